/// Plow trucks of either assignment class.
pub const PLOW_TRUCK_COLOR: &str = "#2563eb";
pub const LOADER_COLOR: &str = "#ea580c";
pub const GRADER_COLOR: &str = "#16a34a";
/// Vehicle types without an assigned color.
pub const DEFAULT_VEHICLE_COLOR: &str = "#6b7280";
/// Dots and line of the selected vehicle's trail.
pub const TRAIL_COLOR: &str = "#60a5fa";

/// Categorical color for a vehicle type.
#[must_use]
pub fn vehicle_color(vehicle_type: &str) -> &'static str {
    match vehicle_type {
        "SA PLOW TRUCK" | "TA PLOW TRUCK" => PLOW_TRUCK_COLOR,
        "LOADER" => LOADER_COLOR,
        "GRADER" => GRADER_COLOR,
        _ => DEFAULT_VEHICLE_COLOR,
    }
}
