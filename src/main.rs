use clap::Parser;
use paraxis::{
    console::{Args, OutputFormat, PartialArgs},
    error::ParaxisResult,
    plottable::render_svg,
    OpticSystem,
};

fn main() -> ParaxisResult<()> {
    env_logger::init();
    //parse CLI arguments
    let paraxis_args = Args::try_from(PartialArgs::parse())?;

    let system: OpticSystem = paraxis_args.lenses.into_iter().collect();

    //analyze the system
    let report = system
        .analyzer_with_config(paraxis_args.config)
        .analyze()?;

    match paraxis_args.output {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    if paraxis_args.svg {
        println!("{}", render_svg(&report, (1024, 600))?);
    }
    Ok(())
}
