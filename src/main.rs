//! Command line front end for the attrition prediction service.

use std::str::FromStr;
use std::time::Duration;

use attrition::api::{ApiClient, ModelParams};
use attrition::config::{self, HttpSettings};
use attrition::display;
use attrition::employee::{EmployeeField, FieldKind};
use attrition::logging;
use attrition::views::{
    AddEmployeeView, EmployeeDetailsView, PredictionOutcome, PrefilledView, TrainingOutcome,
    TrainingView, View, wait_until_idle,
};

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

enum Command {
    Help,
    Fields,
    Models,
    Model(String),
    Train {
        params: ModelParams,
        features: Vec<String>,
    },
    Employees,
    Employee(u32),
    Predict {
        employee_number: u32,
        model_id: Option<String>,
    },
    Add {
        values: Vec<(String, String)>,
    },
}

fn run() -> Result<(), String> {
    let command = parse_args(std::env::args().skip(1).collect())?;
    match command {
        Command::Help => {
            println!("{}", help_text());
            return Ok(());
        }
        Command::Fields => {
            print_fields();
            return Ok(());
        }
        _ => {}
    }
    let settings = config::load_or_default().map_err(|err| err.to_string())?;
    let api = ApiClient::from_settings(&settings).map_err(|err| err.to_string())?;
    let timeout = request_timeout(&settings.http);
    match command {
        Command::Help | Command::Fields => Ok(()),
        Command::Models => list_models(&api),
        Command::Model(model_id) => show_model(&api, &model_id),
        Command::Train { params, features } => train(api, params, &features, timeout),
        Command::Employees => list_employees(api, timeout),
        Command::Employee(number) => show_employee(api, number, timeout),
        Command::Predict {
            employee_number,
            model_id,
        } => predict(api, employee_number, model_id.as_deref(), timeout),
        Command::Add { values } => add_employee(api, &values, timeout),
    }
}

fn list_models(api: &ApiClient) -> Result<(), String> {
    let models = api.try_list_models().map_err(|err| err.to_string())?;
    print_models(&models);
    Ok(())
}

fn show_model(api: &ApiClient, model_id: &str) -> Result<(), String> {
    let details = api
        .fetch_model_details(model_id)
        .map_err(|err| err.to_string())?;
    for line in display::model_details_lines(&details) {
        println!("{line}");
    }
    Ok(())
}

fn train(
    api: ApiClient,
    params: ModelParams,
    features: &[String],
    timeout: Duration,
) -> Result<(), String> {
    let mut view = TrainingView::new(api);
    view.set_params(params).map_err(|err| err.to_string())?;
    for feature in features {
        view.toggle_feature(feature).map_err(|err| err.to_string())?;
    }
    println!("Training in progress...");
    view.start_training();
    settle(&mut view, timeout)?;
    match view.outcome() {
        Some(TrainingOutcome::Trained(result)) => {
            for line in display::training_result_lines(result) {
                println!("{line}");
            }
            println!();
            print_models(view.models());
            Ok(())
        }
        Some(TrainingOutcome::Failed(message)) => Err(message.clone()),
        None => Err("Training finished without a result".to_string()),
    }
}

fn list_employees(api: ApiClient, timeout: Duration) -> Result<(), String> {
    let mut view = PrefilledView::new(api);
    view.activate();
    settle(&mut view, timeout)?;
    let employees = view
        .employees()
        .ok_or_else(|| "Failed to fetch prefilled employees".to_string())?;
    for employee in employees {
        println!(
            "{}  {}",
            employee.employee_number,
            PrefilledView::details_path(employee)
        );
    }
    Ok(())
}

fn load_employee(
    api: ApiClient,
    employee_number: u32,
    timeout: Duration,
) -> Result<EmployeeDetailsView, String> {
    let mut view = EmployeeDetailsView::new(api, employee_number);
    view.activate();
    settle(&mut view, timeout)?;
    if let Some(err) = view.load_error() {
        return Err(err.to_string());
    }
    Ok(view)
}

fn show_employee(api: ApiClient, employee_number: u32, timeout: Duration) -> Result<(), String> {
    let view = load_employee(api, employee_number, timeout)?;
    let Some(details) = view.details() else {
        return Err("Failed to fetch employee details".to_string());
    };
    println!("Employee #{employee_number}");
    print!("{}", display::employee_sections(details));
    println!();
    println!("Models:");
    for model in view.models() {
        println!("  {}  {}", model.model_id, display::model_choice_label(model));
    }
    Ok(())
}

fn predict(
    api: ApiClient,
    employee_number: u32,
    model_id: Option<&str>,
    timeout: Duration,
) -> Result<(), String> {
    let mut view = load_employee(api, employee_number, timeout)?;
    if let Some(model_id) = model_id
        && !view.select_model(model_id)
    {
        return Err(format!("Unknown model: {model_id}"));
    }
    if !view.predict() {
        return Err("No model available for prediction".to_string());
    }
    settle(&mut view, timeout)?;
    match view.prediction() {
        Some(PredictionOutcome::Predicted(result)) => {
            for line in display::prediction_lines(result) {
                println!("{line}");
            }
            Ok(())
        }
        Some(PredictionOutcome::Failed(message)) => Err(message.clone()),
        None => Err("Prediction finished without a result".to_string()),
    }
}

fn add_employee(
    api: ApiClient,
    values: &[(String, String)],
    timeout: Duration,
) -> Result<(), String> {
    let mut view = AddEmployeeView::new(api);
    for (name, value) in values {
        view.set_field_by_name(name, value)
            .map_err(|err| err.to_string())?;
    }
    let sent = view.submit();
    if sent {
        settle(&mut view, timeout)?;
    }
    let message = view.message().unwrap_or_default().to_string();
    match view.last_added() {
        Some(_) => {
            println!("{message}");
            Ok(())
        }
        None => Err(message),
    }
}

fn print_models(models: &[attrition::api::ModelSummary]) {
    if models.is_empty() {
        println!("No models available");
        return;
    }
    println!("Available models:");
    for model in models {
        println!("  {}", display::model_row(model));
    }
}

fn print_fields() {
    for field in EmployeeField::ALL {
        let kind = match field.kind() {
            FieldKind::Number { range: Some((min, max)) } => format!("number {min}-{max}"),
            FieldKind::Number { range: None } => "number".to_string(),
            FieldKind::NumberChoice(options) | FieldKind::Choice(options) => {
                format!("one of: {}", options.join(" | "))
            }
        };
        let default = field.default_value();
        if default.is_empty() {
            println!("{field}  ({kind})");
        } else {
            println!("{field}  ({kind}, default {default})");
        }
    }
}

fn settle<V: View>(view: &mut V, timeout: Duration) -> Result<(), String> {
    if wait_until_idle(view, timeout) {
        Ok(())
    } else {
        view.teardown();
        Err(format!("No response from backend after {}s", timeout.as_secs()))
    }
}

fn request_timeout(http: &HttpSettings) -> Duration {
    let per_request = http.connect_timeout_secs + http.write_timeout_secs + http.read_timeout_secs;
    let attempts = http.list_retry_attempts.max(1) as u64;
    Duration::from_secs(per_request.saturating_mul(attempts + 1))
        + Duration::from_millis(http.retry_max_delay_ms.saturating_mul(attempts))
}

fn parse_args(args: Vec<String>) -> Result<Command, String> {
    let Some((command, rest)) = args.split_first() else {
        return Err(help_text());
    };
    match command.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "fields" => no_extra(rest).map(|_| Command::Fields),
        "models" => no_extra(rest).map(|_| Command::Models),
        "employees" => no_extra(rest).map(|_| Command::Employees),
        "model" => {
            let (model_id, rest) = positional(rest, "model id")?;
            no_extra(rest)?;
            Ok(Command::Model(model_id.to_string()))
        }
        "employee" => {
            let (number, rest) = positional(rest, "employee number")?;
            no_extra(rest)?;
            Ok(Command::Employee(parse_value("employee number", number)?))
        }
        "predict" => parse_predict(rest),
        "train" => parse_train(rest),
        "add" => parse_add(rest),
        other => Err(format!("Unknown command: {other}\n\n{}", help_text())),
    }
}

fn parse_train(args: &[String]) -> Result<Command, String> {
    let mut params = ModelParams::default();
    let mut features = Vec::new();
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        idx += 1;
        let value = args
            .get(idx)
            .ok_or_else(|| format!("{flag} requires a value"))?;
        match flag {
            "--n-estimators" => params.n_estimators = parse_value(flag, value)?,
            "--max-depth" => params.max_depth = parse_value(flag, value)?,
            "--min-samples-leaf" => params.min_samples_leaf = parse_value(flag, value)?,
            "--feature" => features.push(value.clone()),
            _ => return Err(format!("Unknown argument: {flag}")),
        }
        idx += 1;
    }
    Ok(Command::Train { params, features })
}

fn parse_predict(args: &[String]) -> Result<Command, String> {
    let (number, rest) = positional(args, "employee number")?;
    let employee_number = parse_value("employee number", number)?;
    let model_id = match rest {
        [] => None,
        [flag, value] if flag == "--model" => Some(value.clone()),
        [flag] if flag == "--model" => return Err("--model requires a value".to_string()),
        [other, ..] => return Err(format!("Unknown argument: {other}")),
    };
    Ok(Command::Predict {
        employee_number,
        model_id,
    })
}

fn parse_add(args: &[String]) -> Result<Command, String> {
    let mut values = Vec::new();
    let mut idx = 0usize;
    while idx < args.len() {
        if args[idx] != "--set" {
            return Err(format!("Unknown argument: {}", args[idx]));
        }
        idx += 1;
        let pair = args
            .get(idx)
            .ok_or_else(|| "--set requires Field=Value".to_string())?;
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("Expected Field=Value, got {pair}"))?;
        values.push((name.trim().to_string(), value.trim().to_string()));
        idx += 1;
    }
    Ok(Command::Add { values })
}

fn positional<'a>(args: &'a [String], what: &str) -> Result<(&'a str, &'a [String]), String> {
    args.split_first()
        .map(|(first, rest)| (first.as_str(), rest))
        .ok_or_else(|| format!("Missing {what}"))
}

fn no_extra(args: &[String]) -> Result<(), String> {
    match args.first() {
        Some(arg) => Err(format!("Unknown argument: {arg}")),
        None => Ok(()),
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid value for {name}: {value}"))
}

fn help_text() -> String {
    [
        "Usage: attrition <command>",
        "",
        "Commands:",
        "  models                         List trained models",
        "  model <id>                     Show one model",
        "  train [--n-estimators N] [--max-depth N] [--min-samples-leaf N] [--feature NAME]...",
        "                                 Train a model (no --feature uses all features)",
        "  employees                      List prefilled employees",
        "  employee <number>              Show one employee and the available models",
        "  predict <number> [--model ID]  Predict attrition for an employee",
        "  add [--set Field=Value]...     Add an employee; unset fields keep form defaults",
        "  fields                         List employee fields and accepted values",
    ]
    .join("\n")
}
