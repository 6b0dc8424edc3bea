use cotiza_core::error::CotizaError;
use cotiza_core::extract::VendorExtractor;
use cotiza_core::fields::MASTER_FIELDS;
use cotiza_core::identify::markers_for;
use cotiza_core::model::CompanyTag;
use cotiza_core::profiles::builtin;
use std::path::Path;

pub fn list() -> Result<(), CotizaError> {
    println!("Built-in vendor profiles:\n");
    for profile in builtin::load_all()? {
        println!(
            "  {:<10} {} (v{}), {} rules",
            profile.company.key(),
            profile.company.display_name(),
            profile.version,
            profile.rules.len()
        );
        if let Some(ref desc) = profile.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(company: &str) -> Result<(), CotizaError> {
    let tag = CompanyTag::from_str_loose(company).ok_or_else(|| {
        CotizaError::ProfileInvalid(format!(
            "unknown insurer '{company}'. Use one of: hdi, qualitas, ana, atlas"
        ))
    })?;
    let profile = builtin::load_builtin(tag)?;

    println!("{} (version {})\n", tag.display_name(), profile.version);
    if let Some(ref desc) = profile.description {
        println!("{}\n", desc);
    }

    println!(
        "A document is attributed to {} when it contains: {}\n",
        tag.display_name(),
        markers_for(tag).join(", ")
    );

    println!("Fields:\n");
    let max_field_len = profile
        .rules
        .iter()
        .map(|r| r.field.chars().count())
        .max()
        .unwrap_or(20);

    for rule in &profile.rules {
        println!(
            "  {:<width$}  {:<8}  after \"{}\"",
            rule.field,
            rule.kind,
            rule.anchors.join("\" or \""),
            width = max_field_len
        );
        if let Some(ref then) = rule.then {
            println!("  {:<width$}            then after \"{}\"", "", then, width = max_field_len);
        }
        if !rule.stop_at.is_empty() {
            println!(
                "  {:<width$}            stopping at \"{}\"",
                "",
                rule.stop_at.join("\" or \""),
                width = max_field_len
            );
        }
        if !rule.exclude.is_empty() {
            println!(
                "  {:<width$}            skipping \"{}\"",
                "",
                rule.exclude.join("\" or \""),
                width = max_field_len
            );
        }
    }

    let covered: Vec<&str> = profile.rules.iter().map(|r| r.field.as_str()).collect();
    let uncovered: Vec<&str> = MASTER_FIELDS
        .iter()
        .copied()
        .filter(|f| !covered.contains(f))
        .collect();
    if !uncovered.is_empty() {
        println!("\nNever extracted (always shown as placeholder): {}", uncovered.join(", "));
    }
    println!();

    Ok(())
}

pub fn fields() -> Result<(), CotizaError> {
    println!("Comparison fields, in table order:\n");
    for (i, field) in MASTER_FIELDS.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, field);
    }
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), CotizaError> {
    let profile = cotiza_core::profiles::load_profile(file)?;
    // Compiles every label, so bad patterns surface here too.
    let extractor = VendorExtractor::from_profile(&profile)?;

    println!(
        "Profile for {} (v{}) is valid.",
        profile.company.display_name(),
        extractor.version()
    );
    println!("  Rules: {} fields", extractor.fields().count());

    let covered: Vec<&str> = extractor.fields().collect();
    let warnings: Vec<String> = MASTER_FIELDS
        .iter()
        .copied()
        .filter(|f| !covered.contains(f))
        .map(|f| format!("no rule for field '{}'", f))
        .collect();

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
