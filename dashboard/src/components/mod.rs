// Report components, each rendering one section of the dashboard as text
pub mod chart;
pub mod kpi_cards;
pub mod pnl_table;
pub mod scenario_panel;
