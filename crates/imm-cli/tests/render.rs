use imm_cli::render::{
    TableStyle, compare_table, iap_schedule_table, nip_schedule_table, recommendation_table,
};
use imm_model::{AllSchedules, FormattedIapEntry, IapVaccine, NipScheduleEntry, Recommendation};

fn bcg() -> NipScheduleEntry {
    NipScheduleEntry {
        vaccine: "BCG".to_string(),
        due_age: "At birth".to_string(),
        max_age: Some("1 year".to_string()),
        dose: "0.1 ml".to_string(),
        route: "Intra-dermal".to_string(),
        site: "Left Upper Arm".to_string(),
    }
}

fn influenza() -> IapVaccine {
    IapVaccine {
        vaccine: "Influenza".to_string(),
        category: "Routine".to_string(),
        schedule: vec!["6m".to_string(), "7m".to_string(), "Annually from 6m".to_string()],
    }
}

#[test]
fn markdown_recommendation_table() {
    let recommendations = vec![
        Recommendation::from_nip(&bcg()),
        Recommendation::from_iap(&influenza(), "Annual", true),
    ];
    let table = recommendation_table(&recommendations, TableStyle::Markdown);
    insta::assert_snapshot!(table.to_string(), @r"
    | Vaccine   | Program | Category           | Due age  | Dose   | Route        | Site           |
    |-----------|---------|--------------------|----------|--------|--------------|----------------|
    | BCG       | NIP     | Government Program | At birth | 0.1 ml | Intra-dermal | Left Upper Arm |
    | Influenza | IAP     | Routine            | Annual   | -      | -            | -              |
    ");
}

#[test]
fn nip_table_marks_missing_cells() {
    let mut entry = bcg();
    entry.max_age = None;
    entry.site = String::new();
    let rendered = nip_schedule_table(&[entry], TableStyle::Markdown).to_string();
    let row = rendered.lines().nth(2).unwrap();
    let cells: Vec<&str> = row.split('|').map(str::trim).collect();
    assert_eq!(cells, vec!["", "BCG", "At birth", "-", "0.1 ml", "Intra-dermal", "-", ""]);
}

#[test]
fn iap_table_lists_formatted_schedule() {
    let entries = vec![FormattedIapEntry {
        vaccine: "Rabies".to_string(),
        category: "Special circumstances".to_string(),
        schedule: "Post-exposure only".to_string(),
    }];
    let rendered = iap_schedule_table(&entries, TableStyle::Markdown).to_string();
    assert!(rendered.starts_with("| Vaccine"));
    assert!(rendered.contains("| Rabies "));
    assert!(rendered.contains("Post-exposure only"));
}

#[test]
fn compare_table_shows_both_programs() {
    let nip = vec![bcg()];
    let iap = vec![influenza()];
    let categories = vec!["Routine".to_string()];
    let all = AllSchedules {
        nip: &nip,
        iap: &iap,
        iap_categories: &categories,
    };
    let rendered = compare_table(&all, TableStyle::Markdown).to_string();
    assert!(rendered.contains("At birth (until 1 year)"));
    assert!(rendered.contains("6m, 7m, Annually from 6m"));
    assert!(rendered.contains("Government Program"));

    let rich = compare_table(&all, TableStyle::Rich).to_string();
    assert!(rich.contains("Influenza"));
    assert!(rich.contains("Routine"));
}
