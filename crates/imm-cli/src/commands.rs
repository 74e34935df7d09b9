use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info_span};

use imm_cli::logging::log_requested_age;
use imm_cli::pipeline::{
    ExtractionConfig, build_definitions, clean_table, default_clean_output, load_categories,
    load_vocabulary, run_extraction,
};
use imm_cli::render::{
    TableStyle, compare_table, iap_schedule_table, nip_schedule_table, recommendation_table,
};
use imm_cli::types::{BuildResult, CleanResult, ExtractionResult};
use imm_core::VaccineRecommender;
use imm_ingest::{TesseractCommand, TextFileSource};
use imm_model::{AgeInput, FormattedSchedule};
use imm_standards::resolve_standards_root;

use crate::cli::{
    BuildArgs, CleanArgs, CompareArgs, ExtractArgs, OutputArgs, RecommendArgs, ScheduleArgs,
    StandardsArgs,
};

pub fn run_extract(args: &ExtractArgs) -> Result<ExtractionResult> {
    let vocabulary = if args.canonical_names {
        Some(load_vocabulary(args.vocabulary.as_deref())?)
    } else {
        None
    };
    let config = ExtractionConfig {
        nip_source: args.nip_source.clone(),
        iap_source: args.iap_source.clone(),
        output_dir: args.output_dir.clone(),
        vocabulary: vocabulary.as_ref(),
    };
    if args.images {
        let engine = TesseractCommand::new()
            .with_program(args.tesseract.clone())
            .with_lang(args.lang.clone());
        run_extraction(&engine, &config)
    } else {
        run_extraction(&TextFileSource, &config)
    }
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let vocabulary = load_vocabulary(args.vocabulary.as_deref())?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_clean_output(&args.input));
    clean_table(&args.input, &output, &vocabulary)
}

pub fn run_build(args: &BuildArgs) -> Result<BuildResult> {
    let categories = load_categories(args.categories.as_deref())?;
    build_definitions(&args.nip_csv, &args.iap_csv, &categories, &args.output_dir)
}

pub fn run_recommend(args: &RecommendArgs) -> Result<()> {
    let age = AgeInput::parse(&args.value, &args.unit).context("invalid age")?;
    let span = info_span!("recommend", include_iap = args.include_iap);
    let _guard = span.enter();
    log_requested_age(&age.to_string());

    let recommender = load_recommender(&args.standards)?;
    let recommendations = recommender.recommend(&age, args.include_iap);
    debug!(count = recommendations.len(), "recommendations ready");

    if args.output.json {
        return print_json(&recommendations);
    }
    if recommendations.is_empty() {
        println!("No vaccines due at {age}.");
        return Ok(());
    }
    println!("Vaccines due at {age}:");
    println!(
        "{}",
        recommendation_table(&recommendations, table_style(&args.output))
    );
    Ok(())
}

pub fn run_schedule(args: &ScheduleArgs) -> Result<()> {
    let recommender = load_recommender(&args.standards)?;
    let schedule = recommender.get_formatted_schedule(args.schedule_type.into());
    if args.output.json {
        return print_json(&schedule);
    }
    let style = table_style(&args.output);
    let table = match &schedule {
        FormattedSchedule::Nip(entries) => nip_schedule_table(entries, style),
        FormattedSchedule::Iap(entries) => iap_schedule_table(entries, style),
    };
    println!("{table}");
    Ok(())
}

pub fn run_compare(args: &CompareArgs) -> Result<()> {
    let recommender = load_recommender(&args.standards)?;
    let all = recommender.get_all_schedules();
    if args.output.json {
        return print_json(&all);
    }
    println!("{}", compare_table(&all, table_style(&args.output)));
    Ok(())
}

fn load_recommender(args: &StandardsArgs) -> Result<VaccineRecommender> {
    let root = resolve_standards_root(args.standards_dir.as_deref());
    VaccineRecommender::from_standards_dir(&root)
        .with_context(|| format!("load schedule definitions from {}", root.display()))
}

fn table_style(output: &OutputArgs) -> TableStyle {
    if output.markdown {
        TableStyle::Markdown
    } else {
        TableStyle::Rich
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}
