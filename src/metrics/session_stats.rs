use std::time::{Duration, Instant};

/// Counters shown in the header, kept across restarts within one sitting
///
/// The play clock only runs while a game does; pauses and prompts freeze it.
pub struct SessionStats {
    pub games_played: u32,
    pub high_score: u32,
    pub longest_snake: u16,
    play_time: Duration,
    running_since: Option<Instant>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            games_played: 0,
            high_score: 0,
            longest_snake: 0,
            play_time: Duration::ZERO,
            running_since: None,
        }
    }

    pub fn on_game_start(&mut self) {
        self.play_time = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    /// Fold the running stretch into the clock and freeze it
    pub fn on_pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.play_time += since.elapsed();
        }
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_game_over(&mut self, final_score: u32, snake_length: u16) {
        self.on_pause();
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
        if snake_length > self.longest_snake {
            self.longest_snake = snake_length;
        }
    }

    pub fn play_time(&self) -> Duration {
        match self.running_since {
            Some(since) => self.play_time + since.elapsed(),
            None => self.play_time,
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.play_time().as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut stats = SessionStats::new();
        assert_eq!(stats.format_time(), "00:00");

        stats.play_time = Duration::from_secs(125);
        assert_eq!(stats.format_time(), "02:05");

        stats.play_time = Duration::from_secs(3661);
        assert_eq!(stats.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_and_longest_snake() {
        let mut stats = SessionStats::new();

        stats.on_game_over(10, 15);
        assert_eq!(stats.high_score, 10);
        assert_eq!(stats.longest_snake, 15);
        assert_eq!(stats.games_played, 1);

        stats.on_game_over(5, 10);
        assert_eq!(stats.high_score, 10); // Should not decrease
        assert_eq!(stats.longest_snake, 15);
        assert_eq!(stats.games_played, 2);

        stats.on_game_over(15, 20);
        assert_eq!(stats.high_score, 15);
        assert_eq!(stats.longest_snake, 20);
        assert_eq!(stats.games_played, 3);
    }

    #[test]
    fn test_pause_freezes_the_clock() {
        let mut stats = SessionStats::new();
        stats.on_game_start();
        std::thread::sleep(Duration::from_millis(30));

        stats.on_pause();
        let frozen = stats.play_time();
        assert!(frozen.as_millis() >= 30);

        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(stats.play_time(), frozen);

        stats.on_resume();
        std::thread::sleep(Duration::from_millis(10));
        assert!(stats.play_time() > frozen);
    }

    #[test]
    fn test_game_start_resets_the_clock() {
        let mut stats = SessionStats::new();
        stats.on_game_start();
        std::thread::sleep(Duration::from_millis(30));
        stats.on_game_over(3, 8);

        assert!(stats.play_time().as_millis() >= 30);

        stats.on_game_start();
        assert!(stats.play_time().as_millis() < 30);
        assert_eq!(stats.games_played, 1);
    }
}
