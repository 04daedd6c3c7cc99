use medal_core::config::ObservabilityConfig;
use medal_core::tracing::init_tracing;

#[test]
fn init_is_idempotent() {
    let config = ObservabilityConfig::default();
    init_tracing(&config);
    init_tracing(&ObservabilityConfig {
        json_logs: true,
        ..config
    });
    tracing::info!(target: "medal_core", "tracing initialized twice without panicking");
}
