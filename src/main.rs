#![allow(clippy::type_complexity)]

mod body;
mod cors;
mod err;
mod files;
mod http;
mod opt;
mod tcp;

#[tokio::main]
async fn main() -> Result<(), err::DisplayError> {
    let opt::Options {
        verbose,
        port,
        directory,
    } = clap::Parser::parse();

    env_logger::Builder::new()
        .filter_level(match verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    files::main(port, directory).await?;

    Ok(())
}
