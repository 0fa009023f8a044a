use std::time::{Duration, Instant};

/// Session stats for the HUD: how long the current run has lasted and how
/// many runs have finished since launch.
pub struct GameMetrics {
    run_started: Instant,
    pub elapsed_time: Duration,
    pub runs_finished: u32,
    /// Set while a run is live; the clock stops at game over
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            run_started: Instant::now(),
            elapsed_time: Duration::ZERO,
            runs_finished: 0,
            running: false,
        }
    }

    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.run_started.elapsed();
        }
    }

    pub fn on_run_start(&mut self) {
        self.run_started = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    pub fn on_run_over(&mut self) {
        self.update();
        self.running = false;
        self.runs_finished += 1;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_clock_only_runs_during_a_run() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);

        metrics.on_run_start();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() >= 20);

        metrics.on_run_over();
        let frozen = metrics.elapsed_time;
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);
        assert_eq!(metrics.runs_finished, 1);
    }

    #[test]
    fn test_run_start_resets_clock() {
        let mut metrics = GameMetrics::new();
        metrics.on_run_start();
        std::thread::sleep(Duration::from_millis(50));
        metrics.on_run_over();
        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_run_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
