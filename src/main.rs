//! maiir CLI: tokenize a corpus, build an index, query it.
//!
//! ```bash
//! maiir tokenize corpus out/tokens out/tokens_meta.tsv --stem
//! maiir index --add out/tokens out/meta.tsv index.bin
//! maiir search index.bin --limit 20
//! maiir freq out/tokens out/zipf.tsv out/terms.tsv
//! maiir inspect index.bin
//! ```

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use maiir::binary::{IndexHeader, HEADER_SIZE};
use maiir::build::BuildBatch;
use maiir::freq::{self, FreqCounter};
use maiir::tokenize::{tokenize_file, TokenizeStats};
use maiir::{binary, build, search, walk, Result};

mod cli;
use cli::{Cli, Commands};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("maiir=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Tokenize {
            input_dir,
            out_dir,
            meta_out,
            stem,
        } => run_tokenize(&input_dir, &out_dir, &meta_out, stem),
        Commands::Index { add, out } => run_index(&add, &out),
        Commands::Search {
            index,
            offset,
            limit,
            input,
        } => run_search(&index, offset, limit, input.as_deref()),
        Commands::Freq {
            tokens_dir,
            out_zipf,
            out_terms,
        } => run_freq(&tokens_dir, &out_zipf, &out_terms),
        Commands::Inspect { index } => run_inspect(&index),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn progress_bar(len: u64, prefix: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("━━╸"),
    );
    pb.set_prefix(prefix);
    pb
}

fn run_tokenize(input_dir: &Path, out_dir: &Path, meta_out: &Path, do_stem: bool) -> Result<()> {
    let t0 = Instant::now();
    fs::create_dir_all(out_dir)?;

    let files = walk::collect_files(input_dir, "txt")?;
    let mut meta = BufWriter::new(File::create(meta_out)?);
    meta.write_all(b"doc_path\ttok_file\ttokens_count\ttoken_chars\tbytes_in\n")?;

    let mut totals = TokenizeStats::default();
    let mut docs = 0u64;

    let pb = progress_bar(files.len() as u64, "Tokenizing");
    for file in &files {
        pb.inc(1);

        let stem_name = file
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tok_name = format!("{stem_name}.tok");
        let tok_path = out_dir.join(&tok_name);

        let mut out = BufWriter::new(File::create(&tok_path)?);
        let mut stats = TokenizeStats::default();
        tokenize_file(&file.path, &mut out, &mut stats, do_stem)?;
        out.flush()?;

        writeln!(
            meta,
            "{}\t{}\t{}\t{}\t{}",
            file.rel, tok_name, stats.tokens_out, stats.token_chars_sum, stats.bytes_in
        )?;

        docs += 1;
        totals.bytes_in += stats.bytes_in;
        totals.tokens_out += stats.tokens_out;
        totals.token_chars_sum += stats.token_chars_sum;
    }
    pb.finish_with_message("done");
    meta.flush()?;

    let secs = t0.elapsed().as_secs_f64();
    let kb = totals.bytes_in as f64 / 1024.0;
    let avg_token_len = if totals.tokens_out > 0 {
        totals.token_chars_sum as f64 / totals.tokens_out as f64
    } else {
        0.0
    };
    info!(
        docs,
        tokens = totals.tokens_out,
        bytes = totals.bytes_in,
        avg_token_len_chars = avg_token_len,
        secs,
        kb_per_sec = kb / secs.max(1e-9),
        "tokenize finished"
    );
    Ok(())
}

fn run_index(add: &[PathBuf], out: &Path) -> Result<()> {
    let batches: Vec<BuildBatch> = add
        .chunks(2)
        .map(|pair| BuildBatch {
            tok_dir: pair[0].clone(),
            meta_tsv: pair[1].clone(),
        })
        .collect();
    build::run_build(&batches, out)?;
    Ok(())
}

fn run_search(index: &Path, offset: u32, limit: u32, input: Option<&Path>) -> Result<()> {
    let view = binary::IndexView::load(index)?;
    info!(
        version = view.version(),
        docs = view.docs_count(),
        terms = view.terms_count(),
        "index loaded"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match input {
        Some(path) => {
            let mut reader = BufReader::new(File::open(path)?);
            search::run_queries(&view, &mut reader, &mut out, offset, limit)
        }
        None => {
            let stdin = io::stdin();
            let mut reader = stdin.lock();
            search::run_queries(&view, &mut reader, &mut out, offset, limit)
        }
    }
}

fn run_freq(tokens_dir: &Path, out_zipf: &Path, out_terms: &Path) -> Result<()> {
    let files = walk::collect_files(tokens_dir, "tok")?;

    let mut counter = FreqCounter::new();
    let pb = progress_bar(files.len() as u64, "Counting");
    for file in &files {
        pb.inc(1);
        counter.add_file(&file.path)?;
    }
    pb.finish_with_message("done");

    counter.write_terms_tsv(out_terms)?;
    freq::write_zipf_tsv(out_zipf, &counter.sorted_counts_desc())?;

    info!(
        files = files.len(),
        unique_terms = counter.unique_terms(),
        total_tokens = counter.total_tokens,
        "frequency tables written"
    );
    Ok(())
}

fn run_inspect(index: &Path) -> Result<()> {
    let bytes = fs::read(index)?;
    let header = IndexHeader::parse(&bytes)?;

    println!("file            {}", index.display());
    println!("size            {} bytes", bytes.len());
    println!("version         {}", header.version);
    println!("flags           {:#06x}", header.flags);
    println!("docs            {}", header.docs_count);
    println!("terms           {}", header.terms_count);
    println!();
    println!("SECTION         OFFSET      BYTES");
    println!("header          0           {HEADER_SIZE}");
    for (name, off, len) in [
        ("dictionary", header.dict_offset, header.dict_bytes),
        ("postings", header.postings_offset, header.postings_bytes),
        ("docs", header.docs_offset, header.docs_bytes),
    ] {
        println!("{name:<15} {off:<11} {len}");
    }
    Ok(())
}
