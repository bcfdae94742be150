use ppm_sharpen::config::parse_cli;
use ppm_sharpen::pipeline::Pipeline;
use std::env;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ppm_sharpen::PipelineError> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "ppm_sharpen".to_string());
    let config = parse_cli(&program, args)?;

    let mut pipeline = Pipeline::new(config.pipeline.clone());
    let report = pipeline.run(&config.input_path)?;

    println!(
        "Saved {}x{} sharpened image to {}",
        report.input.width,
        report.input.height,
        config.pipeline.output.image.display()
    );
    println!(
        "Saved histogram [{}] to {}",
        report.histogram,
        config.pipeline.output.histogram.display()
    );
    Ok(())
}
