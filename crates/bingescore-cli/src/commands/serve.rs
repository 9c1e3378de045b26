use crate::output::Output;
use bingescore_config::Config;
use color_eyre::eyre::eyre;
use color_eyre::Result;

pub async fn run_serve(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
    output: &Output,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    output.info(format!(
        "Starting BingeScore API on http://{}:{} (providers: {})",
        config.server.host,
        config.server.port,
        config.get_configured_providers().join(", ")
    ));

    bingescore_server::serve(&config)
        .await
        .map_err(|e| eyre!("{:#}", e))?;

    output.success("Server stopped");
    Ok(())
}
