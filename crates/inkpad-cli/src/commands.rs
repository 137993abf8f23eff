//! Subcommand implementations.

use anyhow::{Context, Result};

use inkpad_format::{SaveOptions, load_document, save_document};
use inkpad_model::Element;

use crate::cli::{ConvertArgs, InfoArgs};

pub fn run_info(args: &InfoArgs) -> Result<()> {
    let document = load_document(&args.file)
        .with_context(|| format!("load {}", args.file.display()))?;

    println!("{}", args.file.display());
    println!("  pages:    {}", document.page_count());
    println!("  elements: {}", document.element_count());
    for (index, page) in document.pages().iter().enumerate() {
        let (mut strokes, mut texts, mut images) = (0usize, 0usize, 0usize);
        for layer in page.layers() {
            for element in layer.elements() {
                match element {
                    Element::Stroke(_) => strokes += 1,
                    Element::Text(_) => texts += 1,
                    Element::Image(_) => images += 1,
                }
            }
        }
        println!(
            "  page {}: {:.0}x{:.0} {} background, {} layer(s), {} stroke(s), {} text(s), {} image(s)",
            index + 1,
            page.width,
            page.height,
            page.background(),
            page.layer_count(),
            strokes,
            texts,
            images,
        );
    }
    Ok(())
}

pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let document = load_document(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    let options = SaveOptions::new().with_kind(args.format.into());
    save_document(&args.output, &document, &options)
        .with_context(|| format!("save {}", args.output.display()))?;
    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        "converted document"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use inkpad_format::ContainerKind;
    use inkpad_model::{Document, Layer, Page, Point, Stroke};

    use crate::cli::FormatArg;

    fn sample_document() -> Document {
        let mut stroke = Stroke::new();
        stroke.add_point(Point::new(1.0, 2.0));
        stroke.add_point(Point::new(3.0, 4.0));
        let mut layer = Layer::new();
        layer.add_element(Element::Stroke(stroke));
        let mut page = Page::new(612.0, 792.0);
        page.add_layer(layer);
        let mut document = Document::new();
        document.add_page(page);
        document
    }

    #[test]
    fn convert_rewrites_between_forms() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.ink");
        let output = dir.path().join("out.ink");

        let document = sample_document();
        let options = SaveOptions::new().with_kind(ContainerKind::Flat);
        save_document(&input, &document, &options).unwrap();

        let args = ConvertArgs {
            input: input.clone(),
            output: output.clone(),
            format: FormatArg::Archive,
        };
        run_convert(&args).unwrap();

        let reloaded = load_document(&output).unwrap();
        assert_eq!(reloaded, document);
    }

    #[test]
    fn info_reports_missing_file() {
        let args = InfoArgs {
            file: std::path::PathBuf::from("/nonexistent/notes.ink"),
        };
        assert!(run_info(&args).is_err());
    }
}
