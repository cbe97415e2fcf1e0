use clap::{App, AppSettings, Arg};
use std::ffi::OsString;

/// 命令行参数, 全部收下后丢弃
pub struct CommandArgument {
    ignored: Vec<String>,
}

impl CommandArgument {
    pub fn new() -> Self {
        Self {
            ignored: Vec::new(),
        }
    }
    fn app() -> App<'static> {
        App::new("latency-probe")
            .about("Time a single GET against the local API endpoint")
            .setting(AppSettings::DisableHelpFlag)
            .setting(AppSettings::TrailingVarArg)
            .setting(AppSettings::AllowHyphenValues)
            .arg(
                Arg::new("ignored")
                    .help("accepted and ignored")
                    .multiple_values(true)
                    .allow_hyphen_values(true)
                    .takes_value(true),
            )
    }
    /// 解析进程参数
    pub fn parse(&mut self) {
        self.parse_from(std::env::args_os());
    }
    /// 解析给定参数, 第一个是程序名
    pub fn parse_from<I, T>(&mut self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        self.ignored = match Self::app().try_get_matches_from(args.clone()) {
            Ok(matcher) => matcher
                .values_of("ignored")
                .map(|values| values.map(String::from).collect())
                .unwrap_or_default(),
            Err(err) => {
                // clap 不认识的参数也照样丢弃
                debug!("arguments not understood: {:?}", err.kind());
                args.iter()
                    .skip(1)
                    .map(|arg| arg.to_string_lossy().into_owned())
                    .collect()
            }
        };
        if !self.ignored.is_empty() {
            debug!("ignoring arguments {:?}", self.ignored);
        }
    }
    /// 被忽略的参数
    pub fn get_ignored(&self) -> &[String] {
        &self.ignored
    }
}

impl Default for CommandArgument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod parse_test {
    use super::CommandArgument;

    #[test]
    fn test_command_parser_unparse() {
        let parser = CommandArgument::new();
        assert!(parser.get_ignored().is_empty());
    }
    #[test]
    fn test_no_arguments() {
        let mut parser = CommandArgument::new();
        parser.parse_from(vec!["latency-probe"]);
        assert!(parser.get_ignored().is_empty());
    }
    #[test]
    fn test_positional_arguments_ignored() {
        let mut parser = CommandArgument::new();
        parser.parse_from(vec!["latency-probe", "http://example.com", "123"]);
        assert_eq!(parser.get_ignored(), ["http://example.com", "123"]);
    }
    #[test]
    fn test_flags_land_in_ignored() {
        let mut parser = CommandArgument::new();
        parser.parse_from(vec!["latency-probe", "--help", "-V", "--url", "x"]);
        assert_eq!(parser.get_ignored(), ["--help", "-V", "--url", "x"]);

        let mut parser = CommandArgument::new();
        parser.parse_from(vec!["latency-probe", "-h"]);
        assert_eq!(parser.get_ignored(), ["-h"]);

        let mut parser = CommandArgument::new();
        parser.parse_from(vec!["latency-probe", "--version"]);
        assert_eq!(parser.get_ignored(), ["--version"]);
    }
    #[test]
    fn test_reparse_replaces_ignored() {
        let mut parser = CommandArgument::new();
        parser.parse_from(vec!["latency-probe", "a"]);
        parser.parse_from(vec!["latency-probe"]);
        assert!(parser.get_ignored().is_empty());
    }
}
