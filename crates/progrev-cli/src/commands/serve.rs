pub async fn serve(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let (mut env, settings) = super::load_config()?;
    if let Some(host) = host {
        env.host = host;
    }
    if let Some(port) = port {
        env.port = port;
    }

    progrev::server::serve(env, settings).await?;
    Ok(())
}
