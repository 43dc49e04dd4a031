//! Plan a multi-park trip, then summarize a small trip history.
//!
//! Run with: cargo run --example plan_trip

use chrono::NaiveDate;
use trip_insights::geo_utils::{stop_bounds, stop_center};
use trip_insights::{
    analyze_route, calculate_savings, check_constraints, derive_trip_totals, generate_insights,
    optimize_route, suggest_stay_duration, Coordinate, CostRates, OptimizeOptions,
    RouteConstraints, Stop, TransportationMode, Trip,
};

fn main() {
    // Deliberately poor order: zig-zags between Utah and Wyoming
    let stops = vec![
        Stop::new("yell", "Yellowstone", Coordinate::new(44.4280, -110.5885))
            .with_region("Wyoming"),
        Stop::new("zion", "Zion", Coordinate::new(37.2982, -113.0263))
            .with_region("Utah"),
        Stop::new("grte", "Grand Teton", Coordinate::new(43.7904, -110.6818))
            .with_region("Wyoming"),
        Stop::new("arch", "Arches", Coordinate::new(38.7331, -109.5925))
            .with_region("Utah"),
        Stop::new("brca", "Bryce Canyon", Coordinate::new(37.5930, -112.1871))
            .with_region("Utah"),
        Stop::new("tbd", "Undecided stop", Coordinate::missing()),
    ];

    println!("Trip Planning Example\n");

    let options = OptimizeOptions {
        refine_with_two_opt: true,
        ..OptimizeOptions::default()
    };
    let optimized = optimize_route(&stops, &options);

    println!("1. Route optimization ({}):", optimized.status);
    for (i, stop) in optimized.stops.iter().enumerate() {
        println!(
            "   {}. {} (suggested stay: {} days)",
            i + 1,
            stop.name,
            suggest_stay_duration(stop)
        );
    }
    let savings = calculate_savings(&stops, &optimized.stops);
    if savings >= 0.0 {
        println!("   Saved {:.0} miles\n", savings);
    } else {
        println!("   Reordering added {:.0} miles\n", -savings);
    }

    let report = analyze_route(&optimized.stops);
    println!("2. Route analysis:");
    println!(
        "   Total: {:.0} mi, average leg {:.0} mi, longest {:.0} mi",
        report.total_distance, report.average_segment, report.longest_segment
    );
    println!("   Efficiency: {}", report.efficiency_rating);
    for rec in &report.recommendations {
        println!("   - {}", rec);
    }

    let constraints = check_constraints(&optimized.stops, &RouteConstraints::default());
    println!("\n3. Constraints (feasible: {}):", constraints.feasible);
    for violation in &constraints.violations {
        println!("   ! {}", violation);
    }
    for suggestion in &constraints.suggestions {
        println!("   - {}", suggestion);
    }

    if let (Some(bounds), Some(center)) =
        (stop_bounds(&optimized.stops), stop_center(&optimized.stops))
    {
        println!(
            "\n4. Area: lat {:.2}..{:.2}, lng {:.2}..{:.2}, center ({:.2}, {:.2})",
            bounds.min_lat, bounds.max_lat, bounds.min_lng, bounds.max_lng, center.lat, center.lng
        );
    }

    let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
    let mut trip = Trip::new("summer-2024", "Parks of the West")
        .with_dates(start, end)
        .with_stops(optimized.stops.clone());
    let totals = derive_trip_totals(&trip, &CostRates::default());
    trip = trip.with_totals(
        totals.total_distance_miles,
        totals.estimated_cost_usd,
        totals.total_duration_days,
    );

    println!(
        "\n5. Trip totals: {} days, {:.0} miles, ${:.0}",
        totals.total_duration_days, totals.total_distance_miles, totals.estimated_cost_usd
    );

    // A short history to aggregate
    let history = vec![
        trip,
        Trip::new("spring-2023", "Desert weekend")
            .with_dates(
                NaiveDate::from_ymd_opt(2023, 4, 7).unwrap(),
                NaiveDate::from_ymd_opt(2023, 4, 9).unwrap(),
            )
            .with_stops(vec![
                Stop::new("jotr", "Joshua Tree", Coordinate::new(33.8734, -115.9010))
                    .with_region("California"),
                Stop::new("deva", "Death Valley", Coordinate::new(36.5054, -117.0794))
                    .with_region("California"),
            ])
            .with_totals(210.0, 640.0, 3),
        Trip::new("fall-2022", "Smokies fly-in")
            .with_mode(TransportationMode::Flying)
            .with_dates(
                NaiveDate::from_ymd_opt(2022, 10, 12).unwrap(),
                NaiveDate::from_ymd_opt(2022, 10, 16).unwrap(),
            )
            .with_stops(vec![
                Stop::new("grsm", "Great Smoky Mountains", Coordinate::new(35.6118, -83.4895))
                    .with_region("Tennessee & North Carolina"),
            ])
            .with_totals(0.0, 1150.0, 5),
    ];

    let insights = generate_insights(&history);
    let prefs = &insights.personal_preferences;
    println!("\n6. Insights over {} trips:", prefs.trip_count);
    println!(
        "   Average trip: {:.1} days, ${:.0}",
        prefs.average_duration_days, prefs.average_budget
    );
    for region in &prefs.top_regions {
        println!("   Region {}: {}% of trips", region.region, region.percentage);
    }
    println!("   Cost trend: {}", insights.trend_analysis.cost_trend);
    println!("   Efficiency score: {}/100", insights.efficiency.efficiency_score);
    for rec in &insights.recommendations {
        println!("   [{}] {}: {}", rec.priority, rec.title, rec.description);
    }
}
