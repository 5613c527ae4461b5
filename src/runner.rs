//! The single-threaded cooperative loop: paces CPU cycles and the 60 Hz
//! timer clock independently against wall-clock time, polls the keyboard
//! once per pass, and presents a frame whenever the display is dirty.
//!
//! Deliberately not a threaded timer design — the whole loop runs on the
//! caller's thread, one [`Runner::pass`] per iteration, so `main` stays
//! in full control of pacing and shutdown.

use std::time::{Duration, Instant};

use crate::chip8::ChipSet;
use crate::definitions::{keypad, timer};
use crate::devices::{AudioGate, ControlEvent, KeyboardSource, VideoOutput};
use crate::error::ExecutionFault;

/// What happened on a given pass, so `main` can react to a quit or
/// reload request without the loop itself knowing about process exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopSignal {
    Continue,
    Quit,
    Reload,
}

/// Owns the host adapters and the wall-clock accounting; the [`ChipSet`]
/// itself stays with the caller so a `Reload` can swap it out.
pub struct Runner<V, A, K> {
    video: V,
    audio: A,
    keyboard: K,
    cpu_period: Duration,
    timer_period: Duration,
    cpu_debt: Duration,
    timer_debt: Duration,
    last_tick: Instant,
}

impl<V, A, K> Runner<V, A, K>
where
    V: VideoOutput,
    A: AudioGate,
    K: KeyboardSource,
{
    /// Builds a runner paced at `cpu_hz` CPU cycles per second. The timer
    /// clock is fixed at 60 Hz.
    pub fn new(video: V, audio: A, keyboard: K, cpu_hz: u64) -> Self {
        Self {
            video,
            audio,
            keyboard,
            cpu_period: Duration::from_secs_f64(1.0 / cpu_hz as f64),
            timer_period: Duration::from_secs_f64(1.0 / timer::HERTZ as f64),
            cpu_debt: Duration::ZERO,
            timer_debt: Duration::ZERO,
            last_tick: Instant::now(),
        }
    }

    /// Runs one pass: polls input, advances as many CPU cycles and timer
    /// decrements as wall-clock time has accumulated, gates the tone, and
    /// presents a frame if the display changed. Meant to be called in a
    /// tight loop by `main` until it returns anything but `Continue`.
    pub fn pass(&mut self, chip: &mut ChipSet) -> Result<LoopSignal, ExecutionFault> {
        let (keys, control) = self.keyboard.poll().unwrap_or_else(|e| {
            log::warn!("keyboard poll failed: {}", e);
            ([false; keypad::SIZE], None)
        });
        chip.set_keys(keys);

        match control {
            Some(ControlEvent::Quit) => return Ok(LoopSignal::Quit),
            Some(ControlEvent::Reload) => return Ok(LoopSignal::Reload),
            Some(ControlEvent::Dump) => log::info!("{}", chip),
            None => {}
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.cpu_debt += elapsed;
        self.timer_debt += elapsed;

        while self.cpu_debt >= self.cpu_period {
            self.cpu_debt -= self.cpu_period;
            chip.step()?;
        }

        while self.timer_debt >= self.timer_period {
            self.timer_debt -= self.timer_period;
            chip.tick_timers();
        }

        self.audio.set_active(chip.sound_active());

        if chip.display().is_dirty() {
            if let Err(e) = self.video.present(chip.display().pixels()) {
                log::warn!("video present failed: {}", e);
            }
            chip.clear_dirty();
        }

        Ok(LoopSignal::Continue)
    }
}
