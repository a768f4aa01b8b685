pub mod signal_agent;
