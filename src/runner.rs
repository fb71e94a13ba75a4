//! # Execution Loop
//!
//! Runs a [`Cpu`] on its own thread at a configured clock rate.
//!
//! Each iteration the loop:
//! 1. Stops if the halt flag has been raised or the CPU is already halted.
//! 2. For every clock period elapsed since the last tick, retires one pending
//!    wait cycle and refreshes the random byte cell.
//! 3. When no wait cycles remain, steps one instruction and adds its cycle
//!    count to the wait counter.
//!
//! Over time this holds the average instruction rate at `clock_hz`. A run ends
//! on halt request, BRK, or an execution fault; the CPU is handed back through
//! [`RunHandle::join`].
//!
//! The presentation side never touches the CPU. It keeps a cloned
//! [`SharedMemory`] handle to read the framebuffer and uses a [`Keyboard`] to
//! latch key codes.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Cpu, EmulatorConfig, ExecutionError, MemoryBus, SharedMemory};

/// Why a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// [`RunHandle::halt`] was called.
    Halted,

    /// The program executed BRK.
    Break,

    /// The CPU faulted.
    Fault(ExecutionError),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StopReason::Halted => write!(f, "halted"),
            StopReason::Break => write!(f, "break"),
            StopReason::Fault(err) => write!(f, "fault: {}", err),
        }
    }
}

/// An idle execution loop, ready to run a CPU.
pub struct Runner {
    config: EmulatorConfig,
    rng: StdRng,
    halt: Arc<AtomicBool>,
}

impl Runner {
    pub fn new(config: EmulatorConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            config,
            rng,
            halt: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// The flag [`Runner::run`] polls each iteration. Storing `true` stops
    /// the loop with [`StopReason::Halted`].
    pub fn halt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.halt)
    }

    /// Runs `cpu` on the calling thread until it stops.
    pub fn run<M: MemoryBus>(&mut self, cpu: &mut Cpu<M>) -> StopReason {
        let period = self.config.clock_period();
        let mut last_tick = Instant::now();
        let mut wait_cycles: u64 = 0;

        info!(
            "run started at ${:04X}, clock {} Hz",
            cpu.pc(),
            self.config.clock_hz
        );

        let reason = loop {
            if self.halt.load(Ordering::Relaxed) {
                break StopReason::Halted;
            }
            if cpu.is_halted() {
                break StopReason::Break;
            }

            match period {
                Some(period) => {
                    let ticks = ticks_elapsed(last_tick.elapsed(), period);
                    if ticks > 0 {
                        wait_cycles = wait_cycles.saturating_sub(ticks);
                        last_tick += period * ticks as u32;
                        self.refresh_random(cpu);
                    }
                }
                None => {
                    wait_cycles = 0;
                    self.refresh_random(cpu);
                }
            }

            if wait_cycles > 0 {
                if let Some(period) = period {
                    thread::sleep(period.saturating_sub(last_tick.elapsed()));
                }
                continue;
            }

            match cpu.step() {
                Ok(cycles) => wait_cycles += cycles as u64,
                Err(err) => {
                    warn!("CPU fault: {}", err);
                    break StopReason::Fault(err);
                }
            }
        };

        info!("run stopped ({}) after {} cycles", reason, cpu.cycles());
        reason
    }

    /// Moves `cpu` onto a dedicated thread and starts running it.
    pub fn start<M>(mut self, mut cpu: Cpu<M>) -> std::io::Result<RunHandle<M>>
    where
        M: MemoryBus + Send + 'static,
    {
        let halt = Arc::clone(&self.halt);
        let running = Arc::new(AtomicBool::new(true));
        let running_flag = Arc::clone(&running);

        let thread = thread::Builder::new()
            .name("sim6502-cpu".to_string())
            .spawn(move || {
                let reason = self.run(&mut cpu);
                running_flag.store(false, Ordering::Release);
                (cpu, reason)
            })?;

        Ok(RunHandle {
            halt,
            running,
            thread,
        })
    }

    fn refresh_random<M: MemoryBus>(&mut self, cpu: &mut Cpu<M>) {
        let value: u8 = self.rng.random();
        cpu.memory_mut().write(self.config.rng_cell, value);
    }
}

fn ticks_elapsed(elapsed: Duration, period: Duration) -> u64 {
    (elapsed.as_nanos() / period.as_nanos().max(1)) as u64
}

/// Control handle for a CPU running on its own thread.
pub struct RunHandle<M: MemoryBus> {
    halt: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    thread: JoinHandle<(Cpu<M>, StopReason)>,
}

impl<M: MemoryBus> RunHandle<M> {
    /// Asks the loop to stop; it checks once per iteration.
    pub fn halt(&self) {
        self.halt.store(true, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Waits for the loop to end and returns the CPU with the stop reason.
    ///
    /// Errors only if the execution thread panicked.
    pub fn join(self) -> thread::Result<(Cpu<M>, StopReason)> {
        self.thread.join()
    }
}

/// Writes key codes into the key cell of a shared address space.
#[derive(Clone)]
pub struct Keyboard {
    memory: SharedMemory,
    cell: u16,
}

impl Keyboard {
    pub fn new(memory: SharedMemory, config: &EmulatorConfig) -> Self {
        Self {
            memory,
            cell: config.key_cell,
        }
    }

    /// Latches `code` as the most recent key press.
    pub fn press(&self, code: u8) {
        self.memory.store(self.cell, code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    fn cpu_with(program: &[u8]) -> Cpu<FlatMemory> {
        let mut memory = FlatMemory::new();
        memory.load(0x0600, program);
        Cpu::new(memory)
    }

    #[test]
    fn test_run_until_break() {
        // LDX #$03; DEX; BNE -3; BRK
        let mut cpu = cpu_with(&[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0x00]);
        let mut runner = Runner::new(EmulatorConfig::default().with_clock_hz(0).with_seed(1));

        assert_eq!(runner.run(&mut cpu), StopReason::Break);
        assert_eq!(cpu.x(), 0);
        assert!(cpu.flag_b());
    }

    #[test]
    fn test_run_reports_fault() {
        let mut cpu = cpu_with(&[0xEA, 0x02]);
        let mut runner = Runner::new(EmulatorConfig::default().with_clock_hz(0).with_seed(1));

        assert_eq!(
            runner.run(&mut cpu),
            StopReason::Fault(ExecutionError::IllegalOpcode {
                opcode: 0x02,
                pc: 0x0601
            })
        );
    }

    #[test]
    fn test_seeded_random_cell_is_reproducible() {
        let run_once = || {
            let mut cpu = cpu_with(&[0xEA, 0x00]);
            Runner::new(EmulatorConfig::default().with_clock_hz(0).with_seed(42)).run(&mut cpu);
            cpu.memory().read(0x00FE)
        };

        assert_eq!(run_once(), run_once());
    }

    #[test]
    fn test_rate_limited_run_completes() {
        // Nine instructions at 1 MHz finish well inside a second.
        let mut cpu = cpu_with(&[0xEA, 0xEA, 0xEA, 0xEA, 0xEA, 0xEA, 0xEA, 0xEA, 0x00]);
        let mut runner = Runner::new(EmulatorConfig::default().with_clock_hz(1_000_000).with_seed(3));

        let started = Instant::now();
        assert_eq!(runner.run(&mut cpu), StopReason::Break);
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(cpu.cycles(), 8 * 2 + 7);
    }

    #[test]
    fn test_halt_stops_threaded_loop() {
        // JMP $0600
        let cpu = cpu_with(&[0x4C, 0x00, 0x06]);
        let handle = Runner::new(EmulatorConfig::default().with_seed(9))
            .start(cpu)
            .unwrap();

        thread::sleep(Duration::from_millis(20));
        assert!(handle.is_running());

        handle.halt();
        let (cpu, reason) = handle.join().unwrap();
        assert_eq!(reason, StopReason::Halted);
        assert_eq!(cpu.pc(), 0x0600);
        assert!(cpu.cycles() > 0);
    }

    #[test]
    fn test_keyboard_latches_key_cell() {
        let memory = SharedMemory::new();
        let keyboard = Keyboard::new(memory.clone(), &EmulatorConfig::default());

        keyboard.press(0x77);
        assert_eq!(memory.read(0x00FF), 0x77);
    }

    #[test]
    fn test_ticks_elapsed() {
        let period = Duration::from_micros(20);
        assert_eq!(ticks_elapsed(Duration::from_micros(19), period), 0);
        assert_eq!(ticks_elapsed(Duration::from_micros(61), period), 3);
    }
}
