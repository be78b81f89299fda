//! Hero slider
//!
//! Cycles the active slide with wrap-around. Autoplay runs as a tokio task
//! that sends a tick over the app event channel every period; the event loop
//! answers each tick with [`Slider::advance`]. The task is aborted before a
//! new one starts, so at most one timer is ever live.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::app::AppEvent;
use crate::page::Slide;

/// Slide direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Slider state: slides, active index and the autoplay timer
#[derive(Debug)]
pub struct Slider {
    slides: Vec<Slide>,
    current: usize,
    delay: Duration,
    has_nav: bool,
    /// Page load this slider belongs to, echoed in every tick
    page: u64,
    timer: Option<JoinHandle<()>>,
    ticks: UnboundedSender<AppEvent>,
}

impl Slider {
    /// Take over the hero slides; the first one starts active
    pub fn new(
        mut slides: Vec<Slide>,
        has_nav: bool,
        delay: Duration,
        page: u64,
        ticks: UnboundedSender<AppEvent>,
    ) -> Self {
        for (i, slide) in slides.iter_mut().enumerate() {
            slide.active = i == 0;
        }
        Self {
            slides,
            current: 0,
            delay,
            has_nav,
            page,
            timer: None,
            ticks,
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    pub fn has_nav(&self) -> bool {
        self.has_nav
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_playing(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// (Re)start autoplay from a full period; no-op with fewer than 2 slides
    pub fn start(&mut self) {
        if self.slides.len() < 2 {
            return;
        }
        self.stop();

        if tokio::runtime::Handle::try_current().is_err() {
            debug!("No async runtime, slider autoplay disabled");
            return;
        }

        let delay = self.delay;
        let page = self.page;
        let ticks = self.ticks.clone();
        self.timer = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + delay, delay);
            loop {
                interval.tick().await;
                if ticks.send(AppEvent::SlideTick { page }).is_err() {
                    break;
                }
            }
        }));
    }

    /// Cancel autoplay
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Move the active mark one slide in `direction`, wrapping around
    pub fn advance(&mut self, direction: Direction) {
        let n = self.slides.len();
        if n == 0 {
            return;
        }
        self.slides[self.current].active = false;
        self.current = match direction {
            Direction::Next => (self.current + 1) % n,
            Direction::Prev => (self.current + n - 1) % n,
        };
        self.slides[self.current].active = true;
    }
}

impl Drop for Slider {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Localized;
    use tokio::sync::mpsc;

    fn slides(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| Slide::new(format!("img-{}", i), Localized::new("a", "b", "c")))
            .collect()
    }

    fn slider(n: usize) -> (Slider, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Slider::new(slides(n), true, Duration::from_millis(5000), 7, tx), rx)
    }

    fn active_count(slider: &Slider) -> usize {
        slider.slides().iter().filter(|s| s.active).count()
    }

    #[test]
    fn test_next_cycles_back_to_start() {
        let (mut slider, _rx) = slider(4);
        for _ in 0..4 {
            slider.advance(Direction::Next);
            assert_eq!(active_count(&slider), 1);
        }
        assert_eq!(slider.current(), 0);
    }

    #[test]
    fn test_prev_is_inverse_of_next() {
        let (mut slider, _rx) = slider(3);
        slider.advance(Direction::Prev);
        assert_eq!(slider.current(), 2);
        assert!(slider.slides()[2].active);
        slider.advance(Direction::Next);
        assert_eq!(slider.current(), 0);
        assert_eq!(active_count(&slider), 1);
    }

    #[test]
    fn test_empty_slider_is_noop() {
        let (mut slider, _rx) = slider(0);
        slider.advance(Direction::Next);
        assert_eq!(slider.current(), 0);
        assert!(slider.current_slide().is_none());
    }

    #[test]
    fn test_start_without_runtime_does_not_panic() {
        let (mut slider, _rx) = slider(3);
        slider.start();
        assert!(!slider.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_slide_never_autoplays() {
        let (mut slider, _rx) = slider(1);
        slider.start();
        assert!(!slider.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_ticks_after_full_delay() {
        let (mut slider, mut rx) = slider(3);
        slider.start();
        assert!(slider.is_playing());

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(matches!(rx.recv().await, Some(AppEvent::SlideTick { page: 7 })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_timer() {
        let (mut slider, mut rx) = slider(3);
        slider.start();
        tokio::time::sleep(Duration::from_millis(3000)).await;

        // Restart: the partial period is discarded
        slider.start();
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2001)).await;
        assert!(matches!(rx.recv().await, Some(AppEvent::SlideTick { page: 7 })));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_ticks() {
        let (mut slider, mut rx) = slider(2);
        slider.start();
        slider.stop();
        assert!(!slider.is_playing());
        tokio::time::sleep(Duration::from_millis(12_000)).await;
        assert!(rx.try_recv().is_err());
    }
}
