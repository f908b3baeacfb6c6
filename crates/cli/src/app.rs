use crate::command;
use anyhow::Result;
use clap::Parser;
use markor_config::Config;
use markor_core::{AutoFormatOptions, FormatRegistry, HighlightOptions, RenderOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub enum RunCmd {
    /// Convert a file to a complete HTML preview document.
    #[clap(name = "convert")]
    Convert(command::convert::Convert),
    /// Print the styled ranges of a file as JSON.
    #[clap(name = "highlight")]
    Highlight(command::highlight::Highlight),
    /// Print the detected format of a file.
    #[clap(name = "detect")]
    Detect(command::detect::Detect),
    /// List the toolbar actions available for a file.
    #[clap(name = "actions")]
    Actions(command::actions::Actions),
    /// List the registered formats in detection order.
    #[clap(name = "formats")]
    Formats(command::formats::Formats),
    /// Run the change watcher of the file's format over the whole file.
    #[clap(name = "autoformat")]
    AutoFormat(command::autoformat::AutoFormat),
}

/// Markor CLI arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Enable the logging system.
    #[clap(long)]
    pub log: Option<PathBuf>,

    /// Specify the path of the config file.
    #[clap(long)]
    pub config_file: Option<PathBuf>,
}

/// Engine options derived from the loaded config.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub render: RenderOptions,
    pub highlight: HighlightOptions,
    pub autoformat: AutoFormatOptions,
}

impl Context {
    pub fn from_config(config: &Config) -> Self {
        Self {
            render: RenderOptions {
                light_mode: config.render.light_mode,
                show_line_numbers: config.render.show_line_numbers,
                asset_root: config.render.asset_root.clone(),
            },
            highlight: HighlightOptions {
                dark_mode: config.highlight.dark_mode,
                tab_width: config.highlight.tab_width,
                theme: config.highlight.theme.clone(),
                syntax_dir: config.highlight.syntax_dir.clone(),
            },
            autoformat: AutoFormatOptions {
                list_continuation: config.markdown.list_continuation,
                renumber_ordered_lists: config.markdown.renumber_ordered_lists,
                todotxt_auto_date: config.todotxt.auto_date,
            },
        }
    }

    pub fn registry(&self) -> FormatRegistry {
        FormatRegistry::new(self.highlight.clone(), self.autoformat)
    }
}

impl RunCmd {
    pub async fn run(self, args: Args) -> Result<()> {
        let (config, config_err) = markor_config::load_config_on_startup(args.config_file);

        if let Some(err) = config_err {
            eprintln!(
                "failed to load {}, using the default config: {err}",
                markor_config::config_file().display()
            );
        }

        let _guard = crate::logging::init(args.log, &config.log)?;

        let ctx = Context::from_config(config);

        match self {
            Self::Actions(actions) => actions.run(&ctx),
            Self::AutoFormat(autoformat) => autoformat.run(&ctx),
            Self::Convert(convert) => convert.run(&ctx).await,
            Self::Detect(detect) => detect.run(),
            Self::Formats(formats) => formats.run(),
            Self::Highlight(highlight) => highlight.run(&ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markor_core::FormatId;

    #[derive(Parser, Debug)]
    struct App {
        #[clap(flatten)]
        args: Args,
        #[clap(subcommand)]
        cmd: RunCmd,
    }

    #[test]
    fn test_parse_args() {
        let app = App::try_parse_from([
            "markor",
            "--log",
            "/tmp/markor.log",
            "convert",
            "notes.txt",
            "--format",
            "markdown",
            "--dark",
        ])
        .unwrap();

        assert_eq!(app.args.log, Some(PathBuf::from("/tmp/markor.log")));
        match app.cmd {
            RunCmd::Convert(convert) => {
                assert_eq!(convert.input.format, Some(FormatId::Markdown));
                assert!(convert.dark);
                assert!(!convert.line_numbers);
            }
            cmd => panic!("unexpected command {cmd:?}"),
        }

        assert!(App::try_parse_from(["markor", "detect", "a.md", "--format", "nope"]).is_err());
    }

    #[test]
    fn test_context_from_config() {
        let mut config = Config::default();
        config.render.light_mode = false;
        config.highlight.tab_width = 2;
        config.todotxt.auto_date = false;

        let ctx = Context::from_config(&config);
        assert!(!ctx.render.light_mode);
        assert_eq!(ctx.render.asset_root, "assets/");
        assert_eq!(ctx.highlight.tab_width, 2);
        assert!(!ctx.autoformat.todotxt_auto_date);
        assert!(ctx.autoformat.list_continuation);
    }
}
