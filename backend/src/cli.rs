//! `cqm-assess` command line

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::{AssessmentService, IntakeOutcome, IntakeReport, IntakeWorkflow, SaleCoffeeType};
use shared::{AssessmentResult, CoffeePurchase, PriceBreakdown, QualityMeasurement};

#[derive(Parser, Debug)]
#[command(name = "cqm-assess")]
#[command(author, version, about = "Price and assess coffee purchase lots", long_about = None)]
pub struct Cli {
    /// Refuse measurements with out-of-range percentages or negative prices
    #[arg(long, global = true)]
    pub strict: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a single measurement and print the result
    Evaluate {
        /// Measurement JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Run purchases, assessments, sales and payments through the intake workflow
    Batch {
        /// Batch JSON file, or `-` for stdin
        input: PathBuf,

        /// Date the dashboard treats as today (defaults to the current UTC date)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

/// Input of the `batch` command
#[derive(Debug, Deserialize)]
pub struct BatchInput {
    pub purchases: Vec<CoffeePurchase>,
    #[serde(default)]
    pub assessments: Vec<BatchAssessment>,
    #[serde(default)]
    pub sales: Vec<BatchSale>,
    #[serde(default)]
    pub payments: Vec<BatchPayment>,
}

#[derive(Debug, Deserialize)]
pub struct BatchAssessment {
    pub lot_id: Uuid,
    #[serde(default)]
    pub assessed_by: Option<String>,
    pub measurement: QualityMeasurement,
}

#[derive(Debug, Deserialize)]
pub struct BatchSale {
    pub coffee_type: SaleCoffeeType,
    pub quantity_kg: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct BatchPayment {
    pub supplier: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

/// Output of the `evaluate` command
#[derive(Debug, Serialize)]
pub struct EvaluateOutput {
    pub result: AssessmentResult,
    pub breakdown: Option<PriceBreakdown>,
}

/// Output of the `batch` command
#[derive(Debug, Serialize)]
pub struct BatchOutput {
    pub assessments: Vec<BatchAssessmentOutput>,
    pub report: IntakeReport,
}

#[derive(Debug, Serialize)]
pub struct BatchAssessmentOutput {
    pub lot_id: Uuid,
    pub revision: u32,
    pub result: AssessmentResult,
    pub payable_delta: Option<Decimal>,
    pub intake: IntakeOutcome,
}

fn read_input(path: &Path) -> AppResult<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Evaluate one measurement, with its price breakdown when it is priced
pub fn evaluate(
    config: &Config,
    measurement: &QualityMeasurement,
    strict: bool,
) -> AppResult<EvaluateOutput> {
    let service = AssessmentService::new(config.pricing.clone()).strict(strict);
    let result = service.preview(measurement)?;
    let breakdown = if result.final_price.is_some() {
        result
            .derived_outturn_pct
            .and_then(|derived| service.policy().price_breakdown(measurement, derived))
    } else {
        None
    };
    Ok(EvaluateOutput { result, breakdown })
}

/// Apply a whole batch in order: purchases, assessments, sales, payments
pub fn run_batch(
    config: &Config,
    input: BatchInput,
    strict: bool,
    today: NaiveDate,
) -> AppResult<BatchOutput> {
    let mut workflow = IntakeWorkflow::new(config.pricing.clone(), strict);

    for purchase in input.purchases {
        workflow.register_purchase(purchase)?;
    }

    let mut assessments = Vec::with_capacity(input.assessments.len());
    for item in input.assessments {
        let assessed = workflow.assess(item.lot_id, item.measurement, item.assessed_by)?;
        assessments.push(BatchAssessmentOutput {
            lot_id: item.lot_id,
            revision: assessed.outcome.record.revision,
            result: assessed.outcome.record.result,
            payable_delta: assessed.payable_delta,
            intake: assessed.intake,
        });
    }

    for sale in input.sales {
        workflow.record_sale(sale.coffee_type, sale.quantity_kg)?;
    }
    for payment in input.payments {
        workflow.record_payment(&payment.supplier, payment.amount, &payment.description)?;
    }

    Ok(BatchOutput {
        assessments,
        report: workflow.report(today, config.dashboard.recent_rejections),
    })
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> AppResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Execute a parsed command line and return what should be printed
pub fn run_cli(cli: Cli, config: &Config) -> AppResult<String> {
    match cli.command {
        Commands::Evaluate { input } => {
            let measurement: QualityMeasurement = serde_json::from_str(&read_input(&input)?)?;
            let output = evaluate(config, &measurement, cli.strict)?;
            to_json(&output, cli.pretty)
        }
        Commands::Batch { input, today } => {
            let batch: BatchInput = serde_json::from_str(&read_input(&input)?)?;
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            let output = run_batch(config, batch, cli.strict, today)?;
            to_json(&output, cli.pretty)
        }
    }
}
