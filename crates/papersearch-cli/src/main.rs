mod config;
mod page;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use papersearch_pager::{
    CollectionKind, Control, Finding, MemoryDocument, PagerConfig, PagerSnapshot, Paginator,
    Transition, audit, has_errors,
};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about = "Inspect and replay result page pagination", long_about = None)]
struct Cli {
    /// Pager config file (TOML)
    #[arg(long, global = true, env = "PAPERSEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the visible window and button state of both lists
    Inspect {
        /// Saved result page (HTML)
        page: PathBuf,
    },
    /// Check a page against the markup the pager expects
    Audit {
        /// Saved result page (HTML)
        page: PathBuf,
    },
    /// Click through a page and print the state after each click
    Replay {
        /// Saved result page (HTML)
        page: PathBuf,
        /// next-paper, prev-paper, next-author or prev-author
        #[arg(required = true)]
        controls: Vec<Control>,
    },
}

#[derive(Debug, Serialize)]
struct Step {
    control: Option<Control>,
    moved: Option<bool>,
    collections: [PagerSnapshot; 2],
}

fn main() -> Result<()> {
    init_miette();
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => config::load(path)?,
        None => PagerConfig::default(),
    };

    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Inspect { page } => {
            inspect(&page, &config, cli.json, &mut out)?;
        }
        Commands::Audit { page } => {
            audit_page(&page, &config, cli.json, &mut out)?;
        }
        Commands::Replay { page, controls } => {
            replay(&page, &controls, &config, cli.json, &mut out)?;
        }
    }

    Ok(())
}

/// Initial state of both lists, or `None` when the page has no controls.
fn inspect(
    page: &Path,
    config: &PagerConfig,
    json: bool,
    out: &mut impl Write,
) -> Result<Option<Step>> {
    let doc = page::open(page, config)?;
    let Some(paginator) = attach(&doc, config, page)? else {
        if json {
            writeln!(out, "null").into_diagnostic()?;
        } else {
            writeln!(out, "{}: no paging controls", page.display()).into_diagnostic()?;
        }
        return Ok(None);
    };

    let step = Step {
        control: None,
        moved: None,
        collections: paginator.snapshot(),
    };
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&step).into_diagnostic()?)
            .into_diagnostic()?;
    } else {
        print_step(&doc, config, &step, out)?;
    }
    Ok(Some(step))
}

/// Print the audit findings; fails when any of them is an error.
fn audit_page(
    page: &Path,
    config: &PagerConfig,
    json: bool,
    out: &mut impl Write,
) -> Result<Vec<Finding>> {
    let doc = page::open(page, config)?;
    let findings = audit(&doc, config);
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&findings).into_diagnostic()?)
            .into_diagnostic()?;
    } else if findings.is_empty() {
        writeln!(out, "{}: ok", page.display()).into_diagnostic()?;
    } else {
        for finding in &findings {
            writeln!(out, "{finding}").into_diagnostic()?;
        }
    }
    if has_errors(&findings) {
        return Err(miette!("{} will not paginate", page.display()));
    }
    Ok(findings)
}

/// Apply `controls` in order, recording the state before the first click
/// and after each one.
fn replay(
    page: &Path,
    controls: &[Control],
    config: &PagerConfig,
    json: bool,
    out: &mut impl Write,
) -> Result<Vec<Step>> {
    let doc = page::open(page, config)?;
    let Some(mut paginator) = attach(&doc, config, page)? else {
        return Err(miette!("{} has no paging controls", page.display()));
    };
    let mut steps = vec![Step {
        control: None,
        moved: None,
        collections: paginator.snapshot(),
    }];
    for &control in controls {
        let transition = paginator.handle(control).into_diagnostic()?;
        tracing::debug!(%control, ?transition, "replayed click");
        steps.push(Step {
            control: Some(control),
            moved: Some(matches!(transition, Transition::Moved(_))),
            collections: paginator.snapshot(),
        });
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&steps).into_diagnostic()?)
            .into_diagnostic()?;
    } else {
        for step in &steps {
            print_step(&doc, config, step, out)?;
        }
    }
    Ok(steps)
}

fn attach(
    doc: &MemoryDocument,
    config: &PagerConfig,
    page: &Path,
) -> Result<Option<Paginator<MemoryDocument>>> {
    let paginator = Paginator::attach(doc, config).into_diagnostic()?;
    if paginator.is_none() {
        tracing::info!(page = %page.display(), "no paging controls, pagination disabled");
    }
    Ok(paginator)
}

fn print_step(
    doc: &MemoryDocument,
    config: &PagerConfig,
    step: &Step,
    out: &mut impl Write,
) -> Result<()> {
    let heading = match (step.control, step.moved) {
        (Some(control), Some(true)) => writeln!(out, "> {control}"),
        (Some(control), _) => writeln!(out, "> {control} (ignored)"),
        (None, _) => writeln!(out, "> initial"),
    };
    heading.into_diagnostic()?;
    for snapshot in &step.collections {
        writeln!(out, "  {snapshot}").into_diagnostic()?;
        let marker = match snapshot.kind {
            CollectionKind::Papers => &config.papers.items,
            CollectionKind::Authors => &config.authors.items,
        };
        for (index, title) in page::titles(doc, marker, snapshot.visible.clone()) {
            writeln!(out, "    {index:>4}  {title}").into_diagnostic()?;
        }
    }
    Ok(())
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .context_lines(2)
                .build(),
        )
    }))
    .ok();
    miette::set_panic_hook();
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_replay_parses_controls() {
        let cli = Cli::try_parse_from([
            "papersearch",
            "replay",
            "page.html",
            "next-paper",
            "prev-author",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Replay { controls, .. } => {
                assert_eq!(controls, vec![Control::NextPaper, Control::PrevAuthor]);
            }
            _ => panic!("expected replay"),
        }
    }

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_audit_fails_without_controls() {
        let mut out = Vec::new();
        let result = audit_page(
            &fixture("no-results.html"),
            &PagerConfig::default(),
            false,
            &mut out,
        );

        let err = result.unwrap_err();
        assert!(err.to_string().ends_with("will not paginate"), "{err}");
        let out = output(out);
        assert!(out.contains("error: papers: forward button `.js-nextPaperButton` missing"));
        assert!(out.contains("error: authors: backward button `.js-prevAuthorButton` missing"));
    }

    #[test]
    fn test_audit_passes_search_page() {
        let mut out = Vec::new();
        let findings = audit_page(
            &fixture("search.html"),
            &PagerConfig::default(),
            false,
            &mut out,
        )
        .unwrap();
        assert!(findings.is_empty());
        assert!(output(out).ends_with("search.html: ok\n"));
    }

    #[test]
    fn test_inspect_without_controls() {
        let config = PagerConfig::default();

        let mut out = Vec::new();
        let step = inspect(&fixture("no-results.html"), &config, true, &mut out).unwrap();
        assert!(step.is_none());
        assert_eq!(output(out), "null\n");

        let mut out = Vec::new();
        inspect(&fixture("no-results.html"), &config, false, &mut out).unwrap();
        assert!(output(out).ends_with("no-results.html: no paging controls\n"));
    }

    #[test]
    fn test_inspect_search_page() {
        let mut out = Vec::new();
        let step = inspect(&fixture("search.html"), &PagerConfig::default(), false, &mut out)
            .unwrap()
            .unwrap();
        assert_eq!(step.collections[0].visible, 0..10);

        let out = output(out);
        assert!(out.starts_with("> initial\n  papers 0..10 of 23 (prev off, next on)\n"));
        assert!(out.contains("       0  Attention Is All You Need\n"));
        assert!(out.contains("  authors 0..8 of 8 (prev off, next off)\n"));
    }

    #[test]
    fn test_replay_marks_ignored_clicks() {
        let mut out = Vec::new();
        let steps = replay(
            &fixture("search.html"),
            &[Control::NextAuthor, Control::NextPaper],
            &PagerConfig::default(),
            false,
            &mut out,
        )
        .unwrap();

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1].control, Some(Control::NextAuthor));
        assert_eq!(steps[1].moved, Some(false));
        assert_eq!(steps[2].moved, Some(true));
        assert_eq!(steps[2].collections[0].visible, 10..20);

        let out = output(out);
        assert!(out.contains("> next-author (ignored)\n"));
        assert!(out.contains("> next-paper\n  papers 10..20 of 23 (prev on, next on)\n"));
    }

    #[test]
    fn test_replay_json() {
        let mut out = Vec::new();
        replay(
            &fixture("search.html"),
            &[Control::PrevPaper],
            &PagerConfig::default(),
            true,
            &mut out,
        )
        .unwrap();

        let steps: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(steps[1]["control"], "prev-paper");
        assert_eq!(steps[1]["moved"], false);
        assert_eq!(steps[1]["collections"][0]["kind"], "papers");
    }

    #[test]
    fn test_replay_requires_controls_on_page() {
        let mut out = Vec::new();
        let result = replay(
            &fixture("no-results.html"),
            &[Control::NextPaper],
            &PagerConfig::default(),
            false,
            &mut out,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_replay_rejects_unknown_control() {
        assert!(Cli::try_parse_from(["papersearch", "replay", "page.html", "sideways"]).is_err());
        assert!(Cli::try_parse_from(["papersearch", "replay", "page.html"]).is_err());
    }
}
