use clackr::{
    app::{App, Control},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    feedback::{BellMode, FeedbackSink, TerminalBell},
    input::Keystroke,
    logging,
    runtime::{CrosstermEventSource, GameEvent, GameEventSource, Runner},
    sentence::{FixedPrompt, RandomWords, SentenceSource, Vocabulary},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 250;

/// minimal typing practice tui with live correctness tracking
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a randomly generated sentence character by character while correct and incorrect keystrokes are counted live."
)]
pub struct Cli {
    /// number of words to use in each sentence
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// custom sentence to type instead of random words
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// word list to draw from (json or whitespace separated text)
    #[clap(long)]
    words_file: Option<PathBuf>,

    /// which keystrokes ring the terminal bell
    #[clap(long, value_enum)]
    bell: Option<BellMode>,

    /// seed for reproducible sentences
    #[clap(long)]
    seed: Option<u64>,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Flags win over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(n) = self.number_of_words {
            config.number_of_words = n;
        }
        if let Some(bell) = self.bell {
            config.bell = bell;
        }
        if let Some(ref path) = self.words_file {
            config.vocabulary = Some(path.clone());
        }
        config
    }

    fn sentence_source(&self, config: &Config) -> clackr::Result<Box<dyn SentenceSource>> {
        if let Some(ref prompt) = self.prompt {
            return Ok(Box::new(FixedPrompt(prompt.clone())));
        }

        let vocabulary = match config.vocabulary {
            Some(ref path) => Vocabulary::from_path(path)?,
            None => Vocabulary::builtin()?,
        };

        Ok(match self.seed {
            Some(seed) => Box::new(RandomWords::seeded(vocabulary, config.number_of_words, seed)),
            None => Box::new(RandomWords::new(vocabulary, config.number_of_words)),
        })
    }

    /// Merge flags into the stored config and build the sentence source.
    /// `--save-config` only persists a config whose vocabulary loads.
    fn prepare<C: ConfigStore>(
        &self,
        store: &C,
    ) -> clackr::Result<(Config, Box<dyn SentenceSource>)> {
        let config = self.apply(store.load());
        let source = self.sentence_source(&config)?;
        if self.save_config {
            store.save(&config)?;
        }
        Ok((config, source))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = AppDirs::log_path() {
        // logging is best-effort; the game runs without it
        let _ = logging::init(&path);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let (config, source) = match cli.prepare(&FileConfigStore::new()) {
        Ok(prepared) => prepared,
        Err(err) => {
            let kind = match err {
                clackr::Error::Io(_) => ErrorKind::Io,
                _ => ErrorKind::ValueValidation,
            };
            let mut cmd = Cli::command();
            cmd.error(kind, err).exit();
        }
    };
    let feedback: Box<dyn FeedbackSink> = Box::new(TerminalBell::new(io::stdout(), config.bell));
    let mut app = App::new(source, feedback);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref err) = result {
        log::error!("exiting after error: {err}");
    }
    result
}

fn start_tui<B, E, S, F>(
    terminal: &mut Terminal<B>,
    app: &mut App<S, F>,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    E: GameEventSource,
    S: SentenceSource,
    F: FeedbackSink,
{
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            GameEvent::Tick => continue,
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if app.handle(Keystroke::from(key)) == Control::Quit {
                    break;
                }
            }
        }

        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clackr::{feedback::Recorder, runtime::ChannelEventSource};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> GameEvent {
        GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["clackr"]);

        assert_eq!(cli.number_of_words, None);
        assert_eq!(cli.prompt, None);
        assert_eq!(cli.words_file, None);
        assert_eq!(cli.bell, None);
        assert_eq!(cli.seed, None);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "clackr",
            "-w",
            "25",
            "-p",
            "hello world",
            "--words-file",
            "/tmp/words.txt",
            "--bell",
            "all",
            "--seed",
            "7",
            "--save-config",
        ]);

        assert_eq!(cli.number_of_words, Some(25));
        assert_eq!(cli.prompt, Some("hello world".to_string()));
        assert_eq!(cli.words_file, Some(PathBuf::from("/tmp/words.txt")));
        assert_eq!(cli.bell, Some(BellMode::All));
        assert_eq!(cli.seed, Some(7));
        assert!(cli.save_config);
    }

    #[test]
    fn test_cli_rejects_unknown_bell_mode() {
        assert!(Cli::try_parse_from(["clackr", "--bell", "loud"]).is_err());
    }

    #[test]
    fn test_apply_keeps_config_when_no_flags() {
        let config = Config {
            number_of_words: 12,
            bell: BellMode::Off,
            vocabulary: Some(PathBuf::from("words.txt")),
        };

        let merged = Cli::parse_from(["clackr"]).apply(config.clone());

        assert_eq!(merged, config);
    }

    #[test]
    fn test_apply_flags_override_config() {
        let cli = Cli::parse_from(["clackr", "-w", "3", "--bell", "all", "--words-file", "x.txt"]);

        let merged = cli.apply(Config::default());

        assert_eq!(merged.number_of_words, 3);
        assert_eq!(merged.bell, BellMode::All);
        assert_eq!(merged.vocabulary, Some(PathBuf::from("x.txt")));
    }

    #[test]
    fn test_sentence_source_prompt_wins() {
        let cli = Cli::parse_from(["clackr", "-p", "fixed text", "--seed", "1"]);

        let mut source = cli.sentence_source(&Config::default()).unwrap();

        assert_eq!(source.next_sentence(), "fixed text");
    }

    #[test]
    fn test_sentence_source_default_is_ten_words() {
        let cli = Cli::parse_from(["clackr"]);

        let mut source = cli.sentence_source(&Config::default()).unwrap();

        assert_eq!(source.next_sentence().split(' ').count(), 10);
    }

    #[test]
    fn test_sentence_source_seeded() {
        let cli = Cli::parse_from(["clackr", "--seed", "99", "-w", "4"]);
        let config = cli.apply(Config::default());

        let mut a = cli.sentence_source(&config).unwrap();
        let mut b = cli.sentence_source(&config).unwrap();

        assert_eq!(a.next_sentence(), b.next_sentence());
    }

    #[test]
    fn test_sentence_source_missing_vocabulary() {
        let cli = Cli::parse_from(["clackr", "--words-file", "/definitely/not/here.txt"]);
        let config = cli.apply(Config::default());

        assert!(matches!(
            cli.sentence_source(&config),
            Err(clackr::Error::VocabularyNotFound(_))
        ));
    }

    #[test]
    fn test_start_tui_runs_until_escape() {
        let (tx, rx) = mpsc::channel();
        for event in [
            key(KeyCode::Char('h')),
            GameEvent::Resize,
            key(KeyCode::Char('x')),
            key(KeyCode::Backspace),
            key(KeyCode::Char('i')),
            key(KeyCode::Esc),
        ] {
            tx.send(event).unwrap();
        }

        let runner = Runner::new(ChannelEventSource::new(rx), Duration::from_millis(5));
        let mut app = App::new(FixedPrompt("hi".to_string()), Recorder::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        start_tui(&mut terminal, &mut app, &runner).unwrap();

        assert!(app.session.is_complete());
        assert_eq!(app.session.correct_count(), 2);
        assert_eq!(app.session.correctness_percent(), 100);

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("correctness 100%"));
    }

    #[test]
    fn test_prepare_saves_config_with_valid_vocabulary() {
        let dir = tempdir().unwrap();
        let words = dir.path().join("words.txt");
        std::fs::write(&words, "owl wren").unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let cli = Cli::parse_from([
            "clackr",
            "--save-config",
            "-w",
            "3",
            "--words-file",
            words.to_str().unwrap(),
        ]);

        let (config, mut source) = cli.prepare(&store).unwrap();

        assert_eq!(store.load(), config);
        assert_eq!(store.load().vocabulary, Some(words));
        assert_eq!(source.next_sentence().split(' ').count(), 3);
    }

    #[test]
    fn test_prepare_does_not_save_unloadable_vocabulary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        store.save(&Config::default()).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();
        let cli = Cli::parse_from([
            "clackr",
            "--save-config",
            "--words-file",
            "/definitely/not/here.txt",
        ]);

        assert!(matches!(
            cli.prepare(&store),
            Err(clackr::Error::VocabularyNotFound(_))
        ));

        let after = std::fs::read_to_string(&path).unwrap();
        assert_eq!(before, after);
        assert!(!after.contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_prepare_without_save_leaves_store_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);

        cli_with_prompt("hi").prepare(&store).unwrap();

        assert!(!path.exists());
    }

    fn cli_with_prompt(prompt: &str) -> Cli {
        Cli::parse_from(["clackr", "-p", prompt])
    }
}
