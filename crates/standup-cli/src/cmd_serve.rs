use standup_serve::{AppConfig, ServeConfig};

pub fn execute(config: AppConfig, bind: &str, port: u16) -> anyhow::Result<()> {
    let serve_config = ServeConfig {
        bind: bind.to_string(),
        port,
    };
    tokio::runtime::Runtime::new()?.block_on(standup_serve::serve(config, serve_config))
}
