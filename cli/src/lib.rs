#[macro_use]
extern crate log;

use anyhow::Context;
use cinante::config::Config;
use cinante::json::{load_json_value, save_json, to_json_string, Encoding, JsonOptions};
use cinante::listify::listify;
use cinante::naming::{get_ext, get_filename, normalize_path};
use cinante::path_builder::PathBuilder;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cinante", version = cinante::VERSION, about = "Small file and path helpers")]
pub struct Opt {
    /// Config file, defaults to ~/.cinante/cinante.yml then /etc/cinante/cinante.yml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Log debug messages, RUST_LOG is ignored
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the directory made of the given segments and print it
    #[command(name = "mkdir")]
    Mkdir {
        /// Path segments, the current directory when none is given
        segments: Vec<String>,
        /// Print the path of this file inside the directory instead, the file is not created
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Replace characters that are invalid in file names
    #[command(name = "sanitize")]
    Sanitize {
        name: String,
        /// Replacement of invalid characters, overrides the config file
        #[arg(short, long)]
        rep: Option<String>,
    },
    /// Print the file name of a path, without its extension
    #[command(name = "filename")]
    Filename { path: String },
    /// Print the extension of a path
    #[command(name = "ext")]
    Ext { path: String },
    /// Load a json file and write it back formatted
    #[command(name = "json")]
    Json {
        input: PathBuf,
        /// Destination file, standard output when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        format: JsonFormatArgs,
    },
    /// Print the elements of a json document, one per line
    #[command(name = "items")]
    Items {
        input: PathBuf,
        #[arg(long)]
        encoding: Option<Encoding>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct JsonFormatArgs {
    /// Indentation width, single line output when absent
    #[arg(long)]
    pub indent: Option<usize>,
    #[arg(long)]
    pub sort_keys: bool,
    /// Escape non ascii characters (true or false)
    #[arg(long)]
    pub ensure_ascii: Option<bool>,
    /// Written between items, defaults to ", " or "," when indenting
    #[arg(long)]
    pub item_separator: Option<String>,
    /// Written between keys and values, defaults to ": "
    #[arg(long)]
    pub key_separator: Option<String>,
    /// Encoding of both the input and the output (utf-8, latin-1, ascii)
    #[arg(long)]
    pub encoding: Option<Encoding>,
}

impl JsonFormatArgs {
    /// Command line flags take precedence over the config file.
    fn resolve(&self, config: &Config) -> (Encoding, JsonOptions) {
        let defaults = &config.json.options;
        let mut options = JsonOptions {
            indent: self.indent.or(defaults.indent),
            sort_keys: self.sort_keys || defaults.sort_keys,
            ensure_ascii: self.ensure_ascii.unwrap_or(defaults.ensure_ascii),
            separators: defaults.separators.clone(),
        };
        if self.item_separator.is_some() || self.key_separator.is_some() {
            let (item, key) = options.separators();
            options.separators = Some((
                self.item_separator.clone().unwrap_or_else(|| item.to_string()),
                self.key_separator.clone().unwrap_or_else(|| key.to_string()),
            ));
        }
        (self.encoding.unwrap_or(config.json.encoding), options)
    }
}

pub fn cli_main<W: Write>(opt: Opt, config: Config, out: &mut W) -> Result<(), anyhow::Error> {
    debug!("Running {:?} with config {:?}", opt.command, config);
    match opt.command {
        Command::Mkdir { segments, file } => {
            let builder = PathBuilder::create(&segments)
                .with_context(|| format!("Unable to build path from {:?}", segments))?;
            match file {
                Some(file) => writeln!(out, "{}", (&builder + file).display())?,
                None => writeln!(out, "{}", builder)?,
            }
        }
        Command::Sanitize { name, rep } => {
            let rep = rep.unwrap_or(config.sanitize.replacement);
            writeln!(out, "{}", normalize_path(&name, &rep))?;
        }
        Command::Filename { path } => writeln!(out, "{}", get_filename(&path))?,
        Command::Ext { path } => writeln!(out, "{}", get_ext(&path))?,
        Command::Json {
            input,
            output,
            format,
        } => {
            let (encoding, options) = format.resolve(&config);
            let data = load_json_value(&input, encoding)?;
            match output {
                Some(output) => save_json(&data, &output, encoding, &options)
                    .with_context(|| format!("Unable to save {}", output.display()))?,
                None => writeln!(out, "{}", to_json_string(&data, &options)?)?,
            }
        }
        Command::Items { input, encoding } => {
            let data = load_json_value(&input, encoding.unwrap_or(config.json.encoding))?;
            let compact = JsonOptions {
                indent: None,
                sort_keys: false,
                ..config.json.options
            };
            for item in listify(data) {
                writeln!(out, "{}", to_json_string(&item, &compact)?)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn run(args: &[&str], config: Config) -> String {
        let opt = Opt::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        cli_main(opt, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Opt::command().debug_assert();
    }

    #[test]
    fn test_filename_and_ext() {
        assert_eq!(
            run(&["cinante", "filename", "/a/b/c.py"], Config::default()),
            "c\n"
        );
        assert_eq!(
            run(&["cinante", "ext", "/a/b/c.py"], Config::default()),
            ".py\n"
        );
    }

    #[test]
    fn test_sanitize_replacement_precedence() {
        let mut config = Config::default();
        assert_eq!(run(&["cinante", "sanitize", "a:b"], config.clone()), "ab\n");
        config.sanitize.replacement = "_".into();
        assert_eq!(run(&["cinante", "sanitize", "a:b"], config.clone()), "a_b\n");
        assert_eq!(
            run(&["cinante", "sanitize", "a:b", "--rep", "-"], config),
            "a-b\n"
        );
    }

    #[test]
    fn test_json_flags_override_config() {
        let mut config = Config::default();
        config.json.options.indent = Some(4);
        config.json.encoding = Encoding::Latin1;
        let opt = Opt::try_parse_from([
            "cinante",
            "json",
            "in.json",
            "--indent",
            "2",
            "--encoding",
            "ascii",
        ])
        .unwrap();
        match opt.command {
            Command::Json { format, .. } => {
                let (encoding, options) = format.resolve(&config);
                assert_eq!(encoding, Encoding::Ascii);
                assert_eq!(options.indent, Some(2));
                assert!(!options.sort_keys);
                assert!(options.ensure_ascii);
                assert_eq!(options.separators(), (",", ": "));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_json_separator_and_ascii_flags() {
        let opt = Opt::try_parse_from([
            "cinante",
            "json",
            "in.json",
            "--ensure-ascii",
            "false",
            "--key-separator",
            ":",
        ])
        .unwrap();
        match opt.command {
            Command::Json { format, .. } => {
                let (_, options) = format.resolve(&Config::default());
                assert!(!options.ensure_ascii);
                assert_eq!(options.separators(), (", ", ":"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_version_is_library_version() {
        assert_eq!(Opt::command().get_version(), Some(cinante::VERSION));
    }

    #[test]
    fn test_unknown_encoding_is_rejected() {
        assert!(Opt::try_parse_from(["cinante", "items", "in.json", "--encoding", "ebcdic"]).is_err());
    }
}
