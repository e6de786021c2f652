pub mod auto_alerts;
