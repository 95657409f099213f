//! Interactive shell mode
//!
//! A REPL that keeps one roulette session alive between commands, with
//! command history and tab completion.

use anyhow::{Result, bail};
use clap::Parser;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

use super::commands;
use super::commands::generate::selection_from_names;
use super::commands::spin::spin_roulette;
use super::{Cli, Commands};
use crate::config::Config;
use crate::generate::Generator;
use crate::roulette::Roulette;
use crate::share;
use crate::spin::SpinOptions;
use crate::variant::Variant;

/// Command completer for the shell
struct ShellCompleter {
    commands: Vec<(&'static str, Vec<&'static str>)>,
}

impl ShellCompleter {
    fn new() -> Self {
        let variants: Vec<&'static str> = Variant::all().iter().map(|v| v.id()).collect();
        Self {
            commands: vec![
                ("spin", vec![]),
                ("generate", vec![]),
                ("share", vec!["--print-only"]),
                ("show", vec![]),
                ("pick", vec![]),
                ("variant", variants),
                ("catalog", vec!["--variant"]),
                ("config", vec!["show", "get", "set", "path"]),
                ("help", vec![]),
                ("exit", vec![]),
                ("quit", vec![]),
            ],
        }
    }

    /// Replacement start and candidates for the text before the cursor
    fn candidates(&self, line: &str) -> (usize, Vec<&'static str>) {
        let words: Vec<&str> = line.split_whitespace().collect();
        let trailing_space = line.ends_with(' ');
        let start = if trailing_space {
            line.len()
        } else {
            line.rfind(' ').map(|i| i + 1).unwrap_or(0)
        };

        match (words.as_slice(), trailing_space) {
            ([], _) => (0, self.commands.iter().map(|(cmd, _)| *cmd).collect()),
            ([prefix], false) => (
                start,
                self.commands
                    .iter()
                    .map(|(cmd, _)| *cmd)
                    .filter(|cmd| cmd.starts_with(prefix))
                    .collect(),
            ),
            ([cmd], true) | ([cmd, _], false) => {
                let prefix = if trailing_space { "" } else { words[1] };
                let subs = self
                    .commands
                    .iter()
                    .find(|(c, _)| c == cmd)
                    .map(|(_, subs)| subs.iter().copied().filter(|s| s.starts_with(prefix)).collect())
                    .unwrap_or_default();
                (start, subs)
            }
            _ => (line.len(), vec![]),
        }
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.candidates(&line[..pos]);
        let pairs = words
            .into_iter()
            .map(|w| Pair {
                display: w.to_string(),
                replacement: w.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ShellCompleter {}
impl Validator for ShellCompleter {}
impl Helper for ShellCompleter {}

/// Parse a command line into arguments, handling quotes
fn parse_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match (c, quote) {
            ('"' | '\'', None) => quote = Some(c),
            (c, Some(q)) if c == q => quote = None,
            (c, None) if c.is_whitespace() => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

/// One roulette session shared by every shell command
struct Session {
    config: Config,
    roulette: Roulette,
    show_progress: bool,
}

impl Session {
    fn new(config: Config, show_progress: bool) -> Self {
        let roulette = Roulette::new(config.ui.variant);
        Self { config, roulette, show_progress }
    }

    fn describe(&self) -> String {
        let selection = self.roulette.selection();
        let mut out = format!(
            "{} ({})\n  {}\n  {}",
            self.roulette.variant().name(),
            self.roulette.variant(),
            selection.icons_line(),
            selection.names_line()
        );
        if self.roulette.can_share() {
            out.push_str(&format!("\n\n{}", self.roulette.post()));
        }
        out
    }

    fn variants(&self) -> String {
        Variant::all()
            .iter()
            .map(|v| {
                let marker = if *v == self.roulette.variant() { "*" } else { " " };
                format!("{} {:<8} {}", marker, v.id(), v.name())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn select_variant(&mut self, id: &str) -> Result<()> {
        let variant: Variant = id.parse()?;
        if !self.roulette.set_variant(variant) {
            bail!("The roulette is busy");
        }
        Ok(())
    }

    fn pick(&mut self, names: &[String]) -> Result<()> {
        let variant = self.roulette.variant();
        if !self.roulette.set_selection(selection_from_names(variant, names)?) {
            bail!("Selection does not fit {}", variant);
        }
        Ok(())
    }

    async fn spin(&mut self) -> Result<()> {
        let options = SpinOptions {
            legacy_double_roll: self.config.spin.legacy_double_roll,
        };
        let landing = spin_roulette(&mut self.roulette, options, self.show_progress).await?;
        println!("{}\n{}", landing.icons_line(), landing.names_line());
        Ok(())
    }

    async fn generate(&mut self) -> Result<&str> {
        let generator = Generator::for_mode(self.roulette.variant().generation(), &self.config.generator)?;
        if !self.roulette.generate(&generator).await {
            bail!("Nothing to generate for the current selection");
        }
        Ok(self.roulette.post())
    }

    fn share(&self, print_only: bool) -> Result<String> {
        let url = if print_only {
            self.roulette.share_url()
        } else {
            share::share(self.roulette.post())?
        };
        url.ok_or_else(|| anyhow::anyhow!("Nothing to share yet; run 'generate' first"))
    }

    /// Run a single command.
    /// Returns Ok(true) to continue, Ok(false) to exit gracefully.
    async fn execute(&mut self, args: Vec<String>) -> Result<bool> {
        let Some((cmd, rest)) = args.split_first() else {
            return Ok(true);
        };

        match (cmd.as_str(), rest) {
            ("help", _) => print_help(),
            ("exit" | "quit", _) => return Ok(false),
            ("show", _) => println!("{}", self.describe()),
            ("variant", []) => println!("{}", self.variants()),
            ("variant", [id]) => {
                self.select_variant(id)?;
                println!("{}", self.describe());
            }
            ("pick", names) => {
                self.pick(names)?;
                println!("{}", self.describe());
            }
            ("spin", []) => self.spin().await?,
            ("generate", []) => println!("{}", self.generate().await?),
            ("share", []) => println!("{}", self.share(false)?),
            ("share", [flag]) if flag == "--print-only" => println!("{}", self.share(true)?),
            ("catalog" | "config", _) => self.run_cli(args.clone())?,
            _ => println!("Unknown command: {} (type 'help')", args.join(" ")),
        }

        Ok(true)
    }

    /// Dispatch session-independent commands through clap
    fn run_cli(&self, args: Vec<String>) -> Result<()> {
        let mut argv: Vec<String> = vec!["recipe-roulette".to_string()];
        argv.extend(args);

        let cli = match Cli::try_parse_from(&argv) {
            Ok(cli) => cli,
            Err(e) => {
                // Print clap's error message (includes usage hints)
                println!("{}", e);
                return Ok(());
            }
        };

        let format = cli.output.format();
        match cli.command {
            Some(Commands::Catalog { variant }) => commands::catalog::run(variant, format),
            Some(Commands::Config { command }) => commands::config::run(command, format, cli.output.quiet),
            _ => Ok(()),
        }
    }
}

fn print_help() {
    println!(
        r#"Recipe Roulette Interactive Shell

Session:
  show                     Show the roulette and the last post
  variant                  List roulettes (* marks the current one)
  variant <name>           Switch roulette (resets selection and post)
  pick <name>...           Set every slot by item name, in slot order
  spin                     Spin the roulette
  generate                 Generate a post for the current selection
  share [--print-only]     Open (or print) the X compose page for the post

Other:
  catalog [--variant <v>]  List the slot catalogs
  config show              Show current configuration
  config get <key>         Get a specific setting
  config set <key> <value> Set a configuration value
  config path              Show config file path

  help                     Show this help
  exit, quit               Exit the shell
"#
    );
}

/// Get the history file path
fn history_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("com", "recipe-roulette", "RecipeRoulette")
        .map(|dirs| dirs.data_dir().join("shell_history"))
}

/// Run the interactive shell
pub async fn run() -> Result<()> {
    println!("Recipe Roulette Shell v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let editor_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl = Editor::with_config(editor_config)?;
    rl.set_helper(Some(ShellCompleter::new()));

    // Load history
    if let Some(path) = history_path() {
        let _ = rl.load_history(&path);
    }

    let show_progress = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let mut session = Session::new(Config::load()?, show_progress);
    println!("{}\n", session.describe());

    loop {
        match rl.readline("roulette> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                match session.execute(parse_args(line)).await {
                    Ok(true) => continue,
                    Ok(false) => break,
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(path) = history_path() {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(&path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        parse_args(line)
    }

    #[test]
    fn test_parse_args_quotes() {
        assert_eq!(args("pick 揚げた カレー"), vec!["pick", "揚げた", "カレー"]);
        assert_eq!(args("config set generator.model 'gemini 2'"), vec![
            "config",
            "set",
            "generator.model",
            "gemini 2"
        ]);
        assert!(args("   ").is_empty());
    }

    #[test]
    fn test_completion() {
        let completer = ShellCompleter::new();

        let (start, words) = completer.candidates("ge");
        assert_eq!(start, 0);
        assert_eq!(words, vec!["generate"]);

        let (start, words) = completer.candidates("variant ");
        assert_eq!(start, 8);
        assert_eq!(words.len(), Variant::all().len());

        let (start, words) = completer.candidates("config s");
        assert_eq!(start, 7);
        assert_eq!(words, vec!["show", "set"]);
    }

    #[tokio::test]
    async fn test_session_variant_and_pick() {
        let mut session = Session::new(Config::default(), false);
        assert_eq!(session.roulette.variant(), Variant::Fusion);

        assert!(session.execute(args("variant method")).await.unwrap());
        assert_eq!(session.roulette.variant(), Variant::Method);

        assert!(session.execute(args("pick 蒸した 餃子")).await.unwrap());
        assert_eq!(session.roulette.selection().names(), vec!["蒸した", "餃子"]);

        assert!(session.execute(args("variant brunch")).await.is_err());
        assert!(session.execute(args("pick 餃子 蒸した")).await.is_err());
    }

    #[tokio::test]
    async fn test_session_local_generate_and_share_url() {
        let mut session = Session::new(Config::default(), false);
        session.select_variant("method").unwrap();

        assert!(session.share(true).is_err(), "nothing to share before generating");

        let post = session.generate().await.unwrap().to_string();
        assert_eq!(post, "今日の献立は「揚げたカレー」に決定！ #レシピルーレット");

        let url = session.share(true).unwrap();
        assert!(url.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(session.describe().ends_with(&post));
    }

    #[tokio::test]
    async fn test_session_exit() {
        let mut session = Session::new(Config::default(), false);
        assert!(!session.execute(args("quit")).await.unwrap());
        assert!(session.execute(Vec::new()).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_spin() {
        let mut session = Session::new(Config::default(), false);
        session.spin().await.unwrap();
        assert!(!session.roulette.is_busy());
        assert!(session.roulette.selection().is_valid());
    }
}
