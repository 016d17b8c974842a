use super::*;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_no_args_reads_stdin_forward() {
    let cli = parse(&["urlconv"]);
    assert!(cli.inputs.is_empty());
    assert!(!cli.reverse);
    assert_eq!(cli.direction(), Direction::Forward);
    assert!(cli.config.is_none());
}

#[test]
fn cli_parse_urls() {
    let cli = parse(&["urlconv", "https://a.example/", "http://b.example/?x=1"]);
    assert_eq!(cli.inputs, ["https://a.example/", "http://b.example/?x=1"]);
    assert_eq!(cli.direction(), Direction::Forward);
}

#[test]
fn cli_parse_reverse_short() {
    let cli = parse(&["urlconv", "-r", r#"{"host":"h"}"#]);
    assert!(cli.reverse);
    assert_eq!(cli.direction(), Direction::Reverse);
    assert_eq!(cli.inputs, [r#"{"host":"h"}"#]);
}

#[test]
fn cli_parse_reverse_long() {
    let cli = parse(&["urlconv", "--reverse"]);
    assert_eq!(cli.direction(), Direction::Reverse);
}

#[test]
fn cli_parse_config_path() {
    let cli = parse(&["urlconv", "--config", "/etc/urlconv.toml", "http://h/"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/urlconv.toml")));
    assert_eq!(cli.inputs, ["http://h/"]);
}

#[test]
fn cli_parse_unknown_flag_rejected() {
    assert!(Cli::try_parse_from(["urlconv", "--jobs", "4"]).is_err());
}
