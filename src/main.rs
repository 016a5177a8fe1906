//! greek-utils 命令行工具
//!
//! 文本可作为位置参数传入，省略时从标准输入读取。

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use greek_utils::{
    substitute, ConfigManager, Conversion, MatchMode, RuleLoader, Transliterator,
};

#[derive(Parser)]
#[command(name = "greek-utils")]
#[command(version, about = "Convert between Greek, greeklish and Latin, strip Greek diacritics")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Characters that must never be replaced
    #[arg(long, short = 'i', global = true, value_name = "CHARS")]
    ignore: Option<String>,

    /// Directory with rule tables overriding the embedded ones
    #[arg(long, global = true, value_name = "DIR")]
    rule_dir: Option<PathBuf>,

    /// Show debug logs
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Latin / greeklish -> Greek
    ToGreek(TextArg),
    /// Greek -> greeklish
    ToGreeklish(TextArg),
    /// Greek -> phonetic Latin
    Phonetic(TextArg),
    /// Greek -> transliterated Latin
    Transliterate(TextArg),
    /// Strip diacritics
    Sanitize(TextArg),
    /// Apply a custom rule table (.json / .mp)
    ///
    /// Only the table given with --rules is used, so --rule-dir is rejected here.
    Substitute {
        /// Rule table file
        #[arg(long, short = 'r', value_name = "FILE")]
        rules: PathBuf,
        /// Match each pattern as a character class instead of an exact sequence
        #[arg(long)]
        class: bool,
        #[command(flatten)]
        text: TextArg,
    },
}

#[derive(Args, Debug, PartialEq, Eq)]
struct TextArg {
    /// Text to convert (stdin when omitted)
    text: Option<String>,
}

impl TextArg {
    async fn read(self) -> Result<String> {
        match self.text {
            Some(text) => Ok(text),
            None => {
                let mut buf = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buf)
                    .await
                    .context("failed to read stdin")?;
                Ok(buf)
            }
        }
    }
}

/// 解析后的执行计划
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Convert(Conversion, TextArg),
    Substitute {
        rules: PathBuf,
        mode: MatchMode,
        text: TextArg,
    },
}

/// 子命令 -> 执行计划，同时校验参数组合
fn plan(command: Command, rule_dir: Option<&Path>) -> Result<Action> {
    let action = match command {
        Command::ToGreek(text) => Action::Convert(Conversion::ToGreek, text),
        Command::ToGreeklish(text) => Action::Convert(Conversion::ToGreeklish, text),
        Command::Phonetic(text) => Action::Convert(Conversion::ToPhoneticLatin, text),
        Command::Transliterate(text) => Action::Convert(Conversion::ToTransliteratedLatin, text),
        Command::Sanitize(text) => Action::Convert(Conversion::SanitizeDiacritics, text),
        Command::Substitute { rules, class, text } => {
            if let Some(dir) = rule_dir {
                bail!(
                    "--rule-dir ({}) does not apply to `substitute`; pass the table with --rules",
                    dir.display()
                );
            }
            Action::Substitute {
                rules,
                mode: MatchMode::from_exact(!class),
                text,
            }
        }
    };
    Ok(action)
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "greek_utils=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ignore = cli.ignore.as_deref();

    let (conversion, text) = match plan(cli.command, cli.rule_dir.as_deref())? {
        Action::Convert(conversion, text) => (conversion, text),
        Action::Substitute { rules, mode, text } => {
            let rule_set = RuleLoader::load_file(&rules)
                .await
                .with_context(|| format!("failed to load rules from {}", rules.display()))?;
            let input = text.read().await?;
            emit(&substitute(&input, &rule_set, mode, ignore)?);
            return Ok(());
        }
    };

    let mut builder = ConfigManager::custom().verbose(cli.verbose);
    if let Some(dir) = cli.rule_dir {
        builder = builder.rule_dir(dir);
    }
    let transliterator = Transliterator::new(builder.build()).await?;

    let input = text.read().await?;
    emit(&transliterator.convert(conversion, &input, ignore));
    Ok(())
}

/// 输出结果，保证以换行结尾
fn emit(output: &str) {
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}
