#![cfg(feature = "cli")]

use clap::Parser;
use scriptlet::args::CliArgs;
use std::path::Path;

#[test]
fn test_defaults_read_stdin() {
    let args = CliArgs::try_parse_from(["scriptlet"]).expect("no arguments is valid");
    assert!(args.input.is_none());
    assert!(args.reads_stdin());
    assert!(!args.json);
    assert!(!args.no_banners);
    assert!(args.out_file.is_none());
}

#[test]
fn test_dash_reads_stdin() {
    let args = CliArgs::try_parse_from(["scriptlet", "-"]).expect("valid");
    assert!(args.reads_stdin());
}

#[test]
fn test_all_options() {
    let args = CliArgs::try_parse_from([
        "scriptlet",
        "batch.json",
        "--outFile",
        "out.js",
        "--json",
        "--noBanners",
        "--globalObject",
        "self",
    ])
    .expect("valid");
    assert_eq!(args.input.as_deref(), Some(Path::new("batch.json")));
    assert!(!args.reads_stdin());
    assert_eq!(args.out_file.as_deref(), Some(Path::new("out.js")));
    assert!(args.json);
    assert!(args.no_banners);
    assert_eq!(args.global_object.as_deref(), Some("self"));
}

#[test]
fn test_kebab_case_aliases() {
    let args = CliArgs::try_parse_from([
        "scriptlet",
        "-o",
        "out.js",
        "--no-banners",
        "--global-object",
        "globalThis",
    ])
    .expect("valid");
    assert_eq!(args.out_file.as_deref(), Some(Path::new("out.js")));
    assert!(args.no_banners);
    assert_eq!(args.global_object.as_deref(), Some("globalThis"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    assert!(CliArgs::try_parse_from(["scriptlet", "--bogus"]).is_err());
}
