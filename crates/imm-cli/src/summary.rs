use imm_cli::render::{TableStyle, extraction_table};
use imm_cli::types::{BuildResult, CleanResult, ExtractionResult};

pub fn print_extraction_summary(result: &ExtractionResult) {
    println!("Output: {}", result.output_dir.display());
    println!("{}", extraction_table(result, TableStyle::Rich));
    if result.has_empty_tables() {
        println!("Some tables were empty and were not saved; check the OCR sources.");
    }
}

pub fn print_clean_summary(result: &CleanResult) {
    println!("Input: {} ({} rows)", result.input.display(), result.row_count);
    match &result.output {
        Some(path) => println!(
            "Cleaned {} vaccines into {}",
            result.record_count,
            path.display()
        ),
        None => println!("No vaccines recognised; nothing written."),
    }
}

pub fn print_build_summary(result: &BuildResult) {
    println!(
        "NIP definition: {} ({} entries)",
        result.nip_definition.display(),
        result.nip_entries
    );
    println!(
        "IAP definition: {} ({} vaccines)",
        result.iap_definition.display(),
        result.iap_vaccines
    );
    if !result.categories.is_empty() {
        println!("Categories: {}", result.categories.join(", "));
    }
}
