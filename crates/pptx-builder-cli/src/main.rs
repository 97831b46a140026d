mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use logger::CliLogger;
use pptx_builder::{
    ConfirmOverwrite, DeckOptions, FolderPlan, InputKind, PlacementMode, SlidePreset, SlideSize,
};
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "pptxb",
    about = "Build PowerPoint decks from PDFs or image folders",
    version
)]
struct Cli {
    /// PDF files and/or folders of images
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Rendering resolution for PDF pages [default: 300]
    #[arg(long)]
    dpi: Option<u32>,

    /// Also process every subfolder of folder inputs
    #[arg(short, long)]
    recursive: bool,

    /// Print nothing but errors and never prompt
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Overwrite existing decks without asking
    #[arg(short, long)]
    force: bool,

    /// Log every pipeline step
    #[arg(short, long)]
    verbose: bool,

    /// Output file name (single input, or with --merge)
    #[arg(short, long)]
    output: Option<String>,

    /// Slide size [default: auto]
    #[arg(long, value_enum)]
    size: Option<SizeArg>,

    /// Image placement [default: fit]
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Combine all inputs into a single deck
    #[arg(long)]
    merge: bool,

    /// Load options from a JSON file; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the PDFium library
    #[cfg(feature = "pdfium")]
    #[arg(long)]
    pdfium_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SizeArg {
    Auto,
    Widescreen,
    Standard,
    Letter,
    A4,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Fit,
    Fill,
}

impl From<SizeArg> for SlideSize {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::Auto => Self::Auto,
            SizeArg::Widescreen => Self::Preset(SlidePreset::Widescreen),
            SizeArg::Standard => Self::Preset(SlidePreset::Standard),
            SizeArg::Letter => Self::Preset(SlidePreset::Letter),
            SizeArg::A4 => Self::Preset(SlidePreset::A4),
            SizeArg::Legal => Self::Preset(SlidePreset::Legal),
            SizeArg::Tabloid => Self::Preset(SlidePreset::Tabloid),
        }
    }
}

impl From<ModeArg> for PlacementMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Fit => Self::Fit,
            ModeArg::Fill => Self::Fill,
        }
    }
}

#[cfg(feature = "pdfium")]
type CliRasterizer = pptx_builder::PdfiumRasterizer;

#[cfg(feature = "pdfium")]
fn rasterizer(cli: &Cli) -> CliRasterizer {
    match &cli.pdfium_dir {
        Some(dir) => CliRasterizer::with_library_dir(dir),
        None => CliRasterizer::new(),
    }
}

#[cfg(not(feature = "pdfium"))]
type CliRasterizer = NoRasterizer;

#[cfg(not(feature = "pdfium"))]
fn rasterizer(_cli: &Cli) -> CliRasterizer {
    NoRasterizer
}

/// Stand-in for builds without a PDF renderer
#[cfg(not(feature = "pdfium"))]
#[derive(Clone, Copy)]
struct NoRasterizer;

#[cfg(not(feature = "pdfium"))]
impl pptx_builder::Rasterizer for NoRasterizer {
    fn rasterize(
        &self,
        document: &Path,
        _dpi: u32,
    ) -> pptx_builder::Result<pptx_builder::RasterizedPages> {
        Err(pptx_builder::DeckError::Rasterization {
            path: document.to_owned(),
            reason: "built without PDF support (enable the `pdfium` feature)".to_string(),
        })
    }
}

/// Asks on the terminal before replacing a file
struct StdinConfirm;

impl ConfirmOverwrite for StdinConfirm {
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        if !std::io::stdin().is_terminal() {
            log::warn!(
                "{} exists and stdin is not a terminal; use --force to overwrite",
                path.display()
            );
            return false;
        }

        print!("{} exists. Overwrite? [y/N]: ", path.display());
        let _ = std::io::stdout().flush();
        let mut reply = String::new();
        match std::io::stdin().lock().read_line(&mut reply) {
            Ok(_) => pptx_builder::is_affirmative(&reply),
            Err(_) => false,
        }
    }
}

/// Outcome counters for one run
#[derive(Default)]
struct Tally {
    written: usize,
    skipped: usize,
    failed: usize,
}

struct Runner {
    options: DeckOptions,
    rasterizer: CliRasterizer,
    quiet: bool,
    force: bool,
    recursive: bool,
    output: Option<String>,
    confirm: StdinConfirm,
    tally: Tally,
}

impl Runner {
    fn say(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", message.as_ref());
        }
    }

    fn fail(&mut self, input: &Path, error: impl std::fmt::Display) {
        self.tally.failed += 1;
        eprintln!("✗ {}: {}", input.display(), error);
    }

    /// Overwrite gate; counts a skip when the answer is no
    fn may_write(&mut self, output: &Path) -> bool {
        if pptx_builder::may_write(output, self.quiet, self.force, &mut self.confirm) {
            return true;
        }
        self.tally.skipped += 1;
        self.say(format!("Skipped: {}", output.display()));
        false
    }

    fn saved(&mut self, summary: &pptx_builder::DeckSummary) {
        self.tally.written += 1;
        let (width_in, height_in) = summary.canvas.dimensions_in();
        self.say(format!(
            "✅ Saved: {} ({} slide(s), {:.2}\" x {:.2}\")",
            summary.output_path.display(),
            summary.slide_count,
            width_in,
            height_in
        ));
    }

    async fn process_input(&mut self, input: &Path) {
        if !input.exists() {
            self.fail(input, "input not found");
            return;
        }

        if input.is_dir() {
            self.process_tree(input).await;
            return;
        }

        match pptx_builder::detect_kind(input) {
            InputKind::Document => {
                let name = match &self.output {
                    Some(name) => pptx_builder::with_deck_extension(name),
                    None => pptx_builder::output_file_name(None, &[input]),
                };
                let output = sibling(input, &name);
                self.convert_pdf(input, output).await;
            }
            InputKind::ImageFolder | InputKind::Unknown => {
                self.fail(input, "not a PDF or an image folder");
            }
        }
    }

    /// Folders below `root`, counting each unreadable one as a failure
    fn walk(&mut self, root: &Path) -> Vec<PathBuf> {
        match pptx_builder::walk_folders(root, self.recursive) {
            Ok(walk) => {
                for (folder, e) in walk.failed {
                    self.fail(&folder, e);
                }
                walk.folders
            }
            Err(e) => {
                self.fail(root, e);
                Vec::new()
            }
        }
    }

    /// The `--output` name a document folder cannot honor
    fn ignored_output(&self, folder: &Path, root: &Path) -> Option<&str> {
        self.output.as_deref().filter(|_| folder == root)
    }

    async fn process_tree(&mut self, root: &Path) {
        for folder in self.walk(root) {
            match pptx_builder::plan_folder(&folder) {
                Ok(FolderPlan::Documents(documents)) => {
                    if let Some(name) = self.ignored_output(&folder, root) {
                        log::warn!(
                            "Ignoring --output {} for {}: each PDF gets its own deck",
                            name,
                            folder.display()
                        );
                    }
                    for document in documents {
                        let name = pptx_builder::output_file_name(None, &[&document]);
                        let output = sibling(&document, &name);
                        self.convert_pdf(&document, output).await;
                    }
                }
                Ok(FolderPlan::Images(images)) => {
                    let name = match (&self.output, folder == root) {
                        (Some(name), true) => pptx_builder::with_deck_extension(name),
                        _ => folder_deck_name(&folder),
                    };
                    let output = folder.join(name);
                    self.say(format!(
                        "🖼️  Building PPTX from {} image(s) → {}",
                        images.len(),
                        output.display()
                    ));
                    self.convert_folder(&folder, output).await;
                }
                Ok(FolderPlan::Empty) => self.say(format!("(empty) {}", folder.display())),
                Err(e) => self.fail(&folder, e),
            }
        }
    }

    async fn convert_pdf(&mut self, document: &Path, output: PathBuf) {
        if !self.may_write(&output) {
            return;
        }
        self.say(format!(
            "📄 Converting PDF → PPTX: {} → {}",
            document.display(),
            output.display()
        ));

        let result = pptx_builder::convert_document_async(
            self.rasterizer.clone(),
            document,
            &output,
            self.options,
        )
        .await;
        match result {
            Ok(summary) => self.saved(&summary),
            Err(e) => self.fail(document, e),
        }
    }

    async fn convert_folder(&mut self, folder: &Path, output: PathBuf) {
        if !self.may_write(&output) {
            return;
        }

        match pptx_builder::convert_image_folder_async(folder, &output, self.options).await {
            Ok(summary) => self.saved(&summary),
            Err(e) => self.fail(folder, e),
        }
    }

    /// Gather every convertible file below `inputs` for a merged deck
    fn merge_sources(&mut self, inputs: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for input in inputs {
            if !input.is_dir() {
                files.push(input.clone());
                continue;
            }

            for folder in self.walk(input) {
                match pptx_builder::plan_folder(&folder) {
                    Ok(FolderPlan::Documents(found) | FolderPlan::Images(found)) => {
                        files.extend(found)
                    }
                    Ok(FolderPlan::Empty) => {}
                    Err(e) => self.fail(&folder, e),
                }
            }
        }
        files
    }

    async fn merge(&mut self, inputs: &[PathBuf]) {
        let name = pptx_builder::output_file_name(self.output.as_deref(), inputs);
        let output = PathBuf::from(name);
        let files = self.merge_sources(inputs);

        if !self.may_write(&output) {
            return;
        }
        self.say(format!(
            "Merging {} file(s) → {}",
            files.len(),
            output.display()
        ));

        let result = pptx_builder::convert_files_async(
            self.rasterizer.clone(),
            files,
            &output,
            self.options,
        )
        .await;
        match result {
            Ok(summary) => self.saved(&summary),
            Err(e) => {
                let path = e.source_path().unwrap_or(&output).to_owned();
                self.fail(&path, e)
            }
        }
    }
}

/// `name` placed next to `input`
fn sibling(input: &Path, name: &str) -> PathBuf {
    input
        .parent()
        .map(|parent| parent.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}

/// `<folder-name>.pptx`
fn folder_deck_name(folder: &Path) -> String {
    match folder.file_name() {
        Some(name) => pptx_builder::with_deck_extension(&name.to_string_lossy()),
        None => pptx_builder::DEFAULT_OUTPUT_NAME.to_string(),
    }
}

async fn resolve_options(cli: &Cli) -> Result<DeckOptions> {
    let mut options = match &cli.config {
        Some(path) => DeckOptions::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DeckOptions::default(),
    };

    if let Some(dpi) = cli.dpi {
        options.dpi = dpi;
    }
    if let Some(size) = cli.size {
        options.slide_size = size.into();
    }
    if let Some(mode) = cli.mode {
        options.mode = mode.into();
    }

    options.validate()?;
    Ok(options)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::new(CliLogger::level_for(cli.quiet, cli.verbose)).init()?;

    if cli.output.is_some() && cli.inputs.len() > 1 && !cli.merge {
        bail!("--output can only be used with a single input (or with --merge)");
    }

    let options = resolve_options(&cli).await?;
    log::debug!("Options: {:?}", options);

    let mut runner = Runner {
        options,
        rasterizer: rasterizer(&cli),
        quiet: cli.quiet,
        force: cli.force,
        recursive: cli.recursive,
        output: cli.output.clone(),
        confirm: StdinConfirm,
        tally: Tally::default(),
    };

    if cli.merge {
        runner.merge(&cli.inputs).await;
    } else {
        for input in &cli.inputs {
            runner.process_input(input).await;
        }
    }

    let tally = &runner.tally;
    runner.say(format!(
        "Done: {} written, {} skipped, {} failed",
        tally.written, tally.skipped, tally.failed
    ));
    if tally.failed > 0 {
        bail!("{} input(s) failed", tally.failed);
    }
    Ok(())
}
