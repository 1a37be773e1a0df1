//! Range edits: delete, cut and copy.

use super::common::{
    drain_events, load_document, parse_range, paste_message, pipeline, save_document,
    with_spinner,
};
use clap::Args;
use std::path::PathBuf;
use wavedit_config::EditorConfig;
use wavedit_editor::{Document, Selection};

#[derive(Args)]
pub struct EditArgs {
    /// Input WAV file
    input: PathBuf,

    /// Output WAV file
    output: PathBuf,

    /// Delete samples START..END
    #[arg(
        long,
        value_name = "START..END",
        value_parser = parse_range,
        conflicts_with_all = ["cut", "copy"]
    )]
    delete: Option<(usize, usize)>,

    /// Cut samples START..END and paste them back at --paste-at
    #[arg(
        long,
        value_name = "START..END",
        value_parser = parse_range,
        requires = "paste_at",
        conflicts_with = "copy"
    )]
    cut: Option<(usize, usize)>,

    /// Copy samples START..END and paste them at --paste-at
    #[arg(long, value_name = "START..END", value_parser = parse_range, requires = "paste_at")]
    copy: Option<(usize, usize)>,

    /// Paste position, counted in the document after the cut
    #[arg(long, value_name = "SAMPLE")]
    paste_at: Option<usize>,
}

/// Run the edit command.
pub fn run(args: EditArgs, config: &EditorConfig) -> anyhow::Result<()> {
    let mut doc = load_document(&args.input)?;
    println!("Editing: {} ({} samples)", args.input.display(), doc.len());

    if let Some((a, b)) = args.delete {
        let selection = select(&doc, a, b)?;
        if !doc.delete(selection) {
            anyhow::bail!("Nothing deleted for {}..{}", a, b);
        }
        println!("  Deleted {}..{}", selection.start(), selection.end());
        return save_document(&doc, &args.output);
    }

    let (clip, position) = match (args.cut, args.copy, args.paste_at) {
        (Some((a, b)), None, Some(at)) => {
            let selection = select(&doc, a, b)?;
            let clip = doc
                .cut(selection)
                .ok_or_else(|| anyhow::anyhow!("Nothing cut for {}..{}", a, b))?;
            println!("  Cut {}..{}", selection.start(), selection.end());
            (clip, at)
        }
        (None, Some((a, b)), Some(at)) => {
            let selection = select(&doc, a, b)?;
            let clip = doc
                .copy(selection)
                .ok_or_else(|| anyhow::anyhow!("Nothing copied for {}..{}", a, b))?;
            println!("  Copied {}..{}", selection.start(), selection.end());
            (clip, at)
        }
        _ => anyhow::bail!("Specify --delete, or --cut/--copy together with --paste-at"),
    };

    let position = position.min(doc.len());
    let (pipeline, events) = pipeline(config)?;
    let job = pipeline.paste(&mut doc, &clip, position)?;
    with_spinner(paste_message(job.kind), || job.wait())?;
    println!("  Pasted {} samples at {}", clip.len(), position);
    drain_events(&events);

    save_document(&doc, &args.output)
}

fn select(doc: &Document, a: usize, b: usize) -> anyhow::Result<Selection> {
    let selection = Selection::new(a, b);
    if selection.is_empty() || !selection.fits(doc.len()) {
        anyhow::bail!(
            "Selection {}..{} does not fit a document of {} samples",
            a,
            b,
            doc.len()
        );
    }
    Ok(selection)
}
