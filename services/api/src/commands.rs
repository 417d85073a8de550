use crate::infra::{load_catalog, parse_choice, parse_policy};
use clap::Args;
use scheme_match::error::AppError;
use scheme_match::schemes::{
    CasteCategory, DisabilityStatus, EligibilityConfig, Gender, MatchReport, Occupation,
    ProfileSubmission, SchemaErrorPolicy, SchemeFilter, SchemeMatchService, SchemeType,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Applicant age in years
    #[arg(long)]
    pub(crate) age: u32,
    /// Annual household income in rupees
    #[arg(long)]
    pub(crate) income: u64,
    /// male, female or other
    #[arg(long, value_parser = parse_choice::<Gender>)]
    pub(crate) gender: Gender,
    /// salaried, self-employed, farmer, student, unemployed, retired or homemaker
    #[arg(long, value_parser = parse_choice::<Occupation>)]
    pub(crate) occupation: Occupation,
    /// general, obc, sc, st or ews
    #[arg(long, value_parser = parse_choice::<CasteCategory>)]
    pub(crate) caste: Option<CasteCategory>,
    /// State or union territory of residence
    #[arg(long)]
    pub(crate) state: String,
    #[arg(long, value_parser = parse_choice::<DisabilityStatus>, default_value = "none")]
    pub(crate) disability: DisabilityStatus,
    #[arg(long, default_value_t = 1)]
    pub(crate) household: u32,
    /// JSON or CSV catalog to match against (defaults to the built-in catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// How to treat schemes with malformed rules: omit or strict
    #[arg(long, value_parser = parse_policy, default_value = "omit")]
    pub(crate) policy: SchemaErrorPolicy,
    /// Only print schemes the applicant is eligible for
    #[arg(long)]
    pub(crate) eligible_only: bool,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogValidateArgs {
    /// Catalog file (.json or .csv)
    pub(crate) path: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogListArgs {
    /// Catalog file (defaults to the built-in catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// central or state
    #[arg(long, value_parser = parse_choice::<SchemeType>)]
    pub(crate) scheme_type: Option<SchemeType>,
    /// Include nationwide schemes plus those restricted to this state
    #[arg(long)]
    pub(crate) state: Option<String>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let service = SchemeMatchService::new(
        catalog,
        EligibilityConfig {
            schema_error_policy: args.policy,
        },
    );

    let submission = ProfileSubmission {
        age: args.age,
        annual_income: args.income,
        gender: args.gender,
        occupation: args.occupation,
        caste_category: args.caste,
        state: args.state,
        disability_status: args.disability,
        household_members: args.household,
    };
    let mut report = service.rank(submission)?;
    if args.eligible_only {
        report.matches.retain(|view| view.result.eligible);
    }

    if args.json {
        let stdout = std::io::stdout();
        serde_json::to_writer_pretty(stdout.lock(), &report).map_err(std::io::Error::from)?;
        println!();
    } else {
        render_match_report(&report);
    }

    Ok(())
}

fn render_match_report(report: &MatchReport) {
    println!(
        "Eligible for {} of {} schemes",
        report.eligible_count, report.evaluated
    );

    for (position, view) in report.matches.iter().enumerate() {
        let marker = if view.result.eligible { "eligible" } else { "not eligible" };
        println!(
            "{:>2}. {} [{}] {:.0}% match, {}",
            position + 1,
            view.scheme.title,
            view.scheme.scheme_type_label,
            view.result.score * 100.0,
            marker
        );
        for criterion in &view.result.unmet_criteria {
            println!("      - {criterion}");
        }
    }

    if !report.rejected.is_empty() {
        println!("\nSchemes skipped because of malformed rules:");
        for err in &report.rejected {
            println!("  - {err}");
        }
    }
}

pub(crate) fn run_catalog_validate(args: CatalogValidateArgs) -> Result<(), AppError> {
    let catalog = load_catalog(Some(&args.path))?;
    println!(
        "{}: {} schemes loaded without errors",
        args.path.display(),
        catalog.len()
    );
    Ok(())
}

pub(crate) fn run_catalog_list(args: CatalogListArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let filter = SchemeFilter {
        category: args.category,
        scheme_type: args.scheme_type,
        state: args.state,
    };

    let mut listed = 0usize;
    for scheme in catalog.filter(&filter) {
        listed += 1;
        println!(
            "{:<32} {:<8} {:<18} {}",
            scheme.id,
            scheme.scheme_type.label(),
            scheme.category,
            scheme.title
        );
    }
    println!("{listed} of {} schemes", catalog.len());
    Ok(())
}
