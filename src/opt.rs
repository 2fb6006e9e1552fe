//! Options parser.

use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Default)]
pub struct Options {
    pub help: bool,
    pub version: bool,
    pub bindings: bool,
    pub ops: bool,
    pub debug: Option<bool>,
    pub scroll_margin: Option<usize>,
    pub config_path: Option<String>,
    pub syntax_dir: Option<String>,
    pub log_path: Option<String>,
    pub file: Option<String>,
}

impl Options {
    pub fn parse<T>(args: T) -> Result<Options>
    where
        T: IntoIterator<Item = String>,
    {
        let mut opts = Options::default();
        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--help" => opts.help = true,
                "--version" => opts.version = true,
                "--bindings" => opts.bindings = true,
                "--ops" => opts.ops = true,
                "--debug" => opts.debug = Some(true),
                "--scroll-margin" => opts.scroll_margin = Some(parse_arg(&arg, it.next())?),
                "--config" => opts.config_path = Some(expect_value(&arg, it.next())?),
                "--syntax" => opts.syntax_dir = Some(expect_value(&arg, it.next())?),
                "--log" => opts.log_path = Some(expect_value(&arg, it.next())?),
                arg if arg.starts_with("--") => return Err(Error::unexpected_arg(arg)),
                _ if opts.file.is_some() => return Err(Error::unexpected_arg(&arg)),
                _ => opts.file = Some(arg),
            }
        }
        Ok(opts)
    }
}

fn parse_arg<T>(arg: &str, next_arg: Option<String>) -> Result<T>
where
    T: FromStr,
{
    if let Some(value) = next_arg {
        value
            .parse::<T>()
            .map_err(|_| Error::invalid_value(arg, &value))
    } else {
        Err(Error::expected_value(arg))
    }
}

fn expect_value(arg: &str, next_arg: Option<String>) -> Result<String> {
    next_arg.ok_or_else(|| Error::expected_value(arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options> {
        Options::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn flags_and_values() {
        let opts = parse(&[
            "--debug", "--config", "rc", "--syntax", "dir", "--log", "hed.log", "a.c",
        ])
        .unwrap();
        assert_eq!(opts.debug, Some(true));
        assert_eq!(opts.config_path.as_deref(), Some("rc"));
        assert_eq!(opts.syntax_dir.as_deref(), Some("dir"));
        assert_eq!(opts.log_path.as_deref(), Some("hed.log"));
        assert_eq!(opts.file.as_deref(), Some("a.c"));
        assert!(!opts.help && !opts.version && !opts.bindings && !opts.ops);
    }

    #[test]
    fn no_file() {
        let opts = parse(&["--ops"]).unwrap();
        assert!(opts.ops);
        assert!(opts.file.is_none());
        assert!(opts.debug.is_none());
    }

    #[test]
    fn numeric_values() {
        let opts = parse(&["--scroll-margin", "3"]).unwrap();
        assert_eq!(opts.scroll_margin, Some(3));
        match parse(&["--scroll-margin", "x"]) {
            Err(Error::InvalidValue { arg, value }) => {
                assert_eq!(arg, "--scroll-margin");
                assert_eq!(value, "x");
            }
            _ => panic!("expected invalid value"),
        }
    }

    #[test]
    fn missing_value() {
        match parse(&["--config"]) {
            Err(Error::ExpectedValue { arg }) => assert_eq!(arg, "--config"),
            _ => panic!("expected missing value"),
        }
    }

    #[test]
    fn unexpected_args() {
        match parse(&["--fly"]) {
            Err(Error::UnexpectedArg { arg }) => assert_eq!(arg, "--fly"),
            _ => panic!("expected unexpected arg"),
        }
        match parse(&["a.c", "b.c"]) {
            Err(Error::UnexpectedArg { arg }) => assert_eq!(arg, "b.c"),
            _ => panic!("expected unexpected arg"),
        }
    }
}
