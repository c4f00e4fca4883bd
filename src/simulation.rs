//! Trip simulation.
//!
//! A [`Simulation`] steps through a trip one travel hour per tick. The
//! [`SimulationView`] draws it with one overall progress bar and one bar per
//! leg, sleeping a fixed wall-clock interval per simulated hour.

use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::error::{NavError, Result};
use crate::trip::Trip;
use crate::vehicle::Vehicle;

/// Width of the overall progress bar in cells.
pub const PROGRESS_BAR_WIDTH: usize = 40;

/// Hour-by-hour state of a vehicle travelling a trip.
#[derive(Debug, Clone)]
pub struct Simulation {
    trip: Trip,
    vehicle: Vehicle,
    leg_hours: Vec<u32>,
    required_time: u64,
    elapsed: u64,
    current_leg: usize,
    leg_elapsed: u32,
}

impl Simulation {
    /// Prepare a simulation.
    ///
    /// # Errors
    ///
    /// Returns `ImpossibleTrip` if the vehicle cannot complete the trip.
    pub fn new(trip: Trip, vehicle: Vehicle) -> Result<Self> {
        let leg_hours = trip
            .leg_times(&vehicle)
            .ok_or_else(|| NavError::ImpossibleTrip {
                trip: trip.to_string(),
                vehicle: vehicle.to_string(),
            })?;
        let required_time = leg_hours.iter().copied().map(u64::from).sum();

        let mut sim = Self {
            trip,
            vehicle,
            leg_hours,
            required_time,
            elapsed: 0,
            current_leg: 0,
            leg_elapsed: 0,
        };
        sim.skip_completed_legs();
        Ok(sim)
    }

    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Total hours needed for the trip.
    pub fn required_time(&self) -> u64 {
        self.required_time
    }

    /// Hours simulated so far.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn leg_hours(&self) -> &[u32] {
        &self.leg_hours
    }

    /// Index of the leg being travelled, `None` for a trip without legs.
    pub fn current_leg(&self) -> Option<usize> {
        (!self.leg_hours.is_empty()).then_some(self.current_leg)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.required_time
    }

    /// Advance one hour. Returns false once the trip is complete.
    pub fn tick(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.elapsed += 1;
        self.leg_elapsed += 1;
        self.skip_completed_legs();
        true
    }

    fn skip_completed_legs(&mut self) {
        while self.current_leg + 1 < self.leg_hours.len()
            && self.leg_elapsed >= self.leg_hours[self.current_leg]
        {
            self.current_leg += 1;
            self.leg_elapsed = 0;
        }
    }

    /// Fraction of the whole trip completed, from 0.0 to 1.0.
    pub fn overall_fraction(&self) -> f64 {
        if self.required_time == 0 {
            1.0
        } else {
            self.elapsed as f64 / self.required_time as f64
        }
    }

    /// Fraction of a leg completed, from 0.0 to 1.0.
    pub fn leg_fraction(&self, leg: usize) -> f64 {
        if self.is_finished() || leg < self.current_leg {
            return 1.0;
        }
        if leg > self.current_leg {
            return 0.0;
        }
        match self.leg_hours.get(leg) {
            Some(&0) | None => 1.0,
            Some(&hours) => f64::from(self.leg_elapsed) / f64::from(hours),
        }
    }
}

/// Terminal rendering of a running simulation.
pub struct SimulationView {
    multi: MultiProgress,
    overall: ProgressBar,
    legs: Vec<ProgressBar>,
}

impl SimulationView {
    /// Create the bars for a simulation, drawn to stderr.
    pub fn new(sim: &Simulation) -> Self {
        Self::with_target(sim, ProgressDrawTarget::stderr())
    }

    /// Create bars that are never drawn.
    pub fn hidden(sim: &Simulation) -> Self {
        Self::with_target(sim, ProgressDrawTarget::hidden())
    }

    fn with_target(sim: &Simulation, target: ProgressDrawTarget) -> Self {
        let multi = MultiProgress::with_draw_target(target);

        let overall = multi.add(ProgressBar::new(sim.required_time().max(1)));
        overall.set_style(bar_style(&format!(
            "[{{bar:{}.cyan}}] {{percent}}%",
            PROGRESS_BAR_WIDTH
        )));

        let legs = sim
            .trip()
            .legs()
            .zip(sim.leg_hours())
            .map(|((from, to), &hours)| {
                let bar = multi.add(ProgressBar::new(u64::from(hours.max(1))));
                bar.set_style(bar_style("  {prefix} [{bar:20.cyan}] {percent}%"));
                bar.set_prefix(format!("{} -> {}", from, to));
                bar
            })
            .collect();

        let view = Self {
            multi,
            overall,
            legs,
        };
        view.update(sim);
        view
    }

    /// Redraw every bar from the simulation state.
    pub fn update(&self, sim: &Simulation) {
        set_fraction(&self.overall, sim.overall_fraction());
        for (i, bar) in self.legs.iter().enumerate() {
            set_fraction(bar, sim.leg_fraction(i));
        }
    }

    /// Run the simulation, waiting `tick` per hour through `wait`.
    ///
    /// `wait` returns `true` to stop early. Returns `true` if the trip was
    /// simulated to the end.
    pub fn run(
        &self,
        sim: &mut Simulation,
        tick: Duration,
        mut wait: impl FnMut(Duration) -> bool,
    ) -> bool {
        tracing::debug!(
            "Simulating {} with {} ({} hours)",
            sim.trip(),
            sim.vehicle(),
            sim.required_time()
        );
        while !sim.is_finished() {
            if wait(tick) {
                tracing::info!("Simulation stopped after {} hour(s)", sim.elapsed());
                self.finish();
                return false;
            }
            sim.tick();
            self.update(sim);
        }
        self.finish();
        true
    }

    fn finish(&self) {
        self.overall.finish();
        for bar in &self.legs {
            bar.finish();
        }
        if let Err(e) = self.multi.clear() {
            tracing::debug!("Failed to clear progress bars: {}", e);
        }
    }
}

fn bar_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>_")
}

fn set_fraction(bar: &ProgressBar, fraction: f64) {
    let len = bar.length().unwrap_or(1);
    bar.set_position((fraction * len as f64).round() as u64);
}

/// Header lines describing a simulation.
pub fn describe(sim: &Simulation, tick: Duration) -> Vec<String> {
    let tick_ms = tick.as_millis();
    let total_ms = u128::from(sim.required_time()) * tick_ms;
    vec![
        format!("  * Trip: {}", sim.trip()),
        format!("  * Vehicle: {}", sim.vehicle()),
        format!("  * Ratio: 1 Hour : {} ms", tick_ms),
        format!(
            "  * Required time: {}hr | {}s",
            sim.required_time(),
            total_ms as f64 / 1000.0
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::Atlas;

    fn trip(names: &[&str]) -> Trip {
        let atlas = Atlas::example();
        Trip::from_cities(names.iter().map(|n| atlas.resolve(n).unwrap()).collect()).unwrap()
    }

    fn trolley(hours: u32) -> Vehicle {
        Vehicle::TeleportingTarteTrolley {
            travel_time: hours,
            max_distance: 20_000,
        }
    }

    #[test]
    fn impossible_trip_is_rejected() {
        let err = Simulation::new(
            trip(&["Melbourne", "Tokyo"]),
            Vehicle::TeleportingTarteTrolley {
                travel_time: 1,
                max_distance: 10,
            },
        )
        .unwrap_err();
        assert!(matches!(err, NavError::ImpossibleTrip { .. }));
    }

    #[test]
    fn ticks_through_legs_in_order() {
        let mut sim = Simulation::new(trip(&["Melbourne", "Canberra", "Sydney"]), trolley(2)).unwrap();
        assert_eq!(sim.required_time(), 4);
        assert_eq!(sim.current_leg(), Some(0));

        assert!(sim.tick());
        assert_eq!(sim.current_leg(), Some(0));
        assert_eq!(sim.leg_fraction(0), 0.5);
        assert_eq!(sim.leg_fraction(1), 0.0);

        assert!(sim.tick());
        assert_eq!(sim.current_leg(), Some(1));
        assert_eq!(sim.leg_fraction(0), 1.0);
        assert_eq!(sim.overall_fraction(), 0.5);

        assert!(sim.tick());
        assert!(sim.tick());
        assert!(sim.is_finished());
        assert!(!sim.tick());
        assert_eq!(sim.elapsed(), 4);
        assert_eq!(sim.overall_fraction(), 1.0);
        assert_eq!(sim.leg_fraction(1), 1.0);
    }

    #[test]
    fn required_time_of_long_legs_does_not_overflow() {
        let sim = Simulation::new(trip(&["Melbourne", "Canberra", "Sydney"]), trolley(u32::MAX)).unwrap();
        assert_eq!(sim.required_time(), 2 * u64::from(u32::MAX));
        assert_eq!(sim.overall_fraction(), 0.0);
    }

    #[test]
    fn zero_hour_trip_is_complete_immediately() {
        let sim = Simulation::new(trip(&["Melbourne", "Sydney"]), trolley(0)).unwrap();
        assert!(sim.is_finished());
        assert_eq!(sim.overall_fraction(), 1.0);
        assert_eq!(sim.leg_fraction(0), 1.0);
    }

    #[test]
    fn zero_hour_legs_are_skipped() {
        let car = Vehicle::CrappyCrepeCar { speed: 1000 };
        // Melbourne -> Melbourne takes no time, Melbourne -> Sydney one hour.
        let mut sim = Simulation::new(trip(&["Melbourne", "Melbourne", "Sydney"]), car).unwrap();
        assert_eq!(sim.leg_hours(), &[0, 1]);
        assert_eq!(sim.current_leg(), Some(1));
        assert!(sim.tick());
        assert!(sim.is_finished());
    }

    #[test]
    fn single_city_trip_has_no_legs() {
        let sim = Simulation::new(trip(&["Tokyo"]), trolley(3)).unwrap();
        assert_eq!(sim.current_leg(), None);
        assert!(sim.is_finished());
    }

    #[test]
    fn hidden_view_runs_to_completion() {
        let mut sim = Simulation::new(trip(&["Melbourne", "Canberra", "Sydney"]), trolley(1)).unwrap();
        let view = SimulationView::hidden(&sim);
        let mut waits = 0;
        let completed = view.run(&mut sim, Duration::from_millis(100), |tick| {
            assert_eq!(tick, Duration::from_millis(100));
            waits += 1;
            false
        });
        assert!(completed);
        assert!(sim.is_finished());
        assert_eq!(waits, 2);
    }

    #[test]
    fn stopping_leaves_simulation_unfinished() {
        let mut sim = Simulation::new(trip(&["Melbourne", "Canberra", "Sydney"]), trolley(5)).unwrap();
        let view = SimulationView::hidden(&sim);
        let mut waits = 0;
        let completed = view.run(&mut sim, Duration::ZERO, |_| {
            waits += 1;
            waits == 3
        });
        assert!(!completed);
        assert_eq!(sim.elapsed(), 2);
        assert!(!sim.is_finished());
    }

    #[test]
    fn describe_mentions_ratio_and_required_time() {
        let sim = Simulation::new(trip(&["Melbourne", "Canberra"]), trolley(25)).unwrap();
        let lines = describe(&sim, Duration::from_millis(100));
        assert!(lines.iter().any(|l| l.contains("1 Hour : 100 ms")));
        assert!(lines.iter().any(|l| l.contains("25hr | 2.5s")));
        assert!(lines[0].contains("Melbourne (AUS) -> Canberra (AUS)"));
    }
}
