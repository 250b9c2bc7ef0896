mod commands;
mod error;
mod util;

use std::path::PathBuf;

use structopt::clap::AppSettings::*;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use commands::edit::TagSelector;

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(name = "v", visible_alias = "view", about = "Show the tags of an mp3 file")]
    View {
        #[structopt(long, help = "Print tags as JSON")]
        json: bool,

        #[structopt(name = "mp3file", parse(from_os_str), help = "Path to the .mp3 file")]
        path: PathBuf,
    },

    #[structopt(
        name = "e",
        visible_alias = "edit",
        about = "Replace the content of one tag of an mp3 file",
        usage = "id3tag e (-t|-a|-A|-y|-m|-c) <text> <mp3file>"
    )]
    Edit {
        #[structopt(flatten)]
        selector: TagSelector,

        #[structopt(name = "text", help = "New content for the selected tag")]
        content: String,

        #[structopt(name = "mp3file", parse(from_os_str), help = "Path to the .mp3 file")]
        path: PathBuf,

        #[structopt(
            long = "temp",
            parse(from_os_str),
            help = "Where to write the edited file before it replaces the original [default: <mp3file>.tmp]"
        )]
        temp_path: Option<PathBuf>,
    },
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "id3tag",
    about = "View and edit the ID3 tags of mp3 files.",
    settings = &[SubcommandRequiredElseHelp, DisableHelpSubcommand, VersionlessSubcommands],
)]
struct CliOpts {
    #[structopt(short, long, help = "Show verbose output", global = true)]
    verbose: bool,

    #[structopt(subcommand)]
    cmd: Commands,
}

fn init_logging(verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("warn"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let opts = CliOpts::from_iter(wild::args_os());
    init_logging(opts.verbose);

    match opts.cmd {
        Commands::View { json, path } => commands::view::run(path, json)?,
        Commands::Edit {
            selector,
            content,
            path,
            temp_path,
        } => commands::edit::run(selector, content, path, temp_path)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use id3tag_format::FrameId;

    #[test]
    fn parse_edit() {
        let opts = CliOpts::from_iter_safe(&["id3tag", "e", "-A", "Record", "song.mp3"]).unwrap();
        match opts.cmd {
            Commands::Edit {
                selector,
                content,
                path,
                temp_path,
            } => {
                assert_eq!(selector.frame().unwrap(), FrameId::Album);
                assert_eq!(content, "Record");
                assert_eq!(path, PathBuf::from("song.mp3"));
                assert_eq!(temp_path, None);
            }
            cmd => panic!("unexpected command: {:?}", cmd),
        }
    }

    #[test]
    fn parse_view() {
        let opts = CliOpts::from_iter_safe(&["id3tag", "view", "--json", "song.mp3"]).unwrap();
        assert!(matches!(opts.cmd, Commands::View { json: true, .. }));
    }

    #[test]
    fn view_requires_file() {
        assert!(CliOpts::from_iter_safe(&["id3tag", "v"]).is_err());
    }
}
