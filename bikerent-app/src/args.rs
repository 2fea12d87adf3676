use chrono::NaiveDate;
use clap::Parser;

#[derive(Parser)]
#[command(about = "Interactive bike booking widget", long_about = None)]
pub struct Cli {
    /// Daily rate in euros
    #[arg(short, long, default_value_t = 20.0)]
    pub rate: f64,

    #[arg(long, default_value_t = 1)]
    pub bike_id: i64,

    #[arg(long, default_value = "Electric Bike")]
    pub bike_name: String,

    /// Viewport width in pixels; narrow widths get the mobile layout
    #[arg(short, long, default_value_t = 1440)]
    pub width: u32,

    /// Pretend today is this date (yyyy-MM-dd)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}
