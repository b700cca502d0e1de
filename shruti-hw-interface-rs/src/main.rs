//! shruti-hw-interface
//!
//! Runs the Shruti parameter editor on a Raspberry Pi Pico 2:
//!
//! 1. Turning an encoder raises the board's INT line. The control task reads
//!    all positions and switch levels, and feeds turn deltas to
//!    [`Editor::nudge`] and debounced presses to the editor commands.
//! 2. A panel button press selects its page group via
//!    [`Editor::toggle_group`].
//! 3. The OLED task renders the editor once per tick and flushes changed
//!    frames.
//!
//! Patches are kept in RAM; they do not survive a power cycle.

#![no_std]
#![no_main]

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use shruti::editor::{Editor, EditorConfig, Group, NUM_GROUPS};
use shruti::resources::BuiltinResources;
use shruti::storage::MemoryPatchStorage;
use shruti_controls::{ControlBoard, EncoderTracker, SwitchTracker, DEFAULT_ADDRESS};
use shruti_oled_display_rs::{display_update_task, DisplayConfig, OledDriver};

// ── Boot block and interrupts ────────────────────────────────────────────

#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// ── Static storage ───────────────────────────────────────────────────────

type I2cBus = Mutex<CriticalSectionRawMutex, I2c<'static, I2C0, i2c::Async>>;

/// I2C0, shared by the encoder board and the OLED.
static I2C_BUS: StaticCell<I2cBus> = StaticCell::new();

/// Written by the control and panel tasks, rendered by the OLED task.
static EDITOR: StaticCell<Mutex<CriticalSectionRawMutex, Editor>> = StaticCell::new();

static PATCHES: StaticCell<MemoryPatchStorage> = StaticCell::new();

type SharedI2c = I2cDevice<'static, CriticalSectionRawMutex, I2c<'static, I2C0, i2c::Async>>;

// ── Control surface mapping ──────────────────────────────────────────────

/// Push switch of each encoder.
const SWITCH_CYCLE_PAGE: usize = 0;
const SWITCH_CONFIRM: usize = 1;
const SWITCH_UNDO: usize = 2;
const SWITCH_RESET: usize = 3;

/// Switch levels are re-read at this interval until debouncing settles.
const SWITCH_POLL: Duration = Duration::from_millis(5);

/// Panel buttons are polled at this interval.
const PANEL_POLL: Duration = Duration::from_millis(10);

// ── Tasks ────────────────────────────────────────────────────────────────

#[embassy_executor::task]
async fn oled_task(
    driver: OledDriver<SharedI2c>,
    editor: &'static Mutex<CriticalSectionRawMutex, Editor>,
    config: DisplayConfig,
) {
    display_update_task(driver, editor, config).await;
}

/// Encoder turns and push switches.
///
/// The editor lock is only taken for in-memory updates, never across I2C.
#[embassy_executor::task]
async fn control_task(
    mut int_pin: Input<'static>,
    mut board: ControlBoard<SharedI2c>,
    editor: &'static Mutex<CriticalSectionRawMutex, Editor>,
    patches: &'static mut MemoryPatchStorage,
) {
    info!("control task started");

    let mut turns = EncoderTracker::new();
    let mut switches = SwitchTracker::new();
    if let Ok(positions) = board.read_all_positions().await {
        turns.update(positions);
    }

    loop {
        if switches.settling() {
            Timer::after(SWITCH_POLL).await;
        } else {
            int_pin.wait_for_low().await;
        }

        let positions = board.read_all_positions().await;
        let levels = board.read_switches().await;
        // Clear after reading so a movement during the reads raises INT again.
        if board.clear_interrupt_flags().await.is_err() {
            warn!("failed to clear interrupt flags");
        }

        let deltas = match positions {
            Ok(positions) => turns.update(positions),
            Err(e) => {
                error!("encoder read failed: {}", e);
                turns.reset();
                [0; 4]
            }
        };
        let pressed = match levels {
            Ok(levels) => switches.update(levels),
            Err(e) => {
                error!("switch read failed: {}", e);
                [false; 4]
            }
        };

        if deltas.iter().all(|&d| d == 0) && !pressed.iter().any(|&p| p) {
            continue;
        }

        let mut editor = editor.lock().await;
        for (controller, &delta) in deltas.iter().enumerate() {
            if delta != 0 {
                editor.nudge(controller, delta);
                debug!("controller {}: {}", controller, delta);
            }
        }
        if pressed[SWITCH_CYCLE_PAGE] {
            editor.cycle_page();
        }
        if pressed[SWITCH_CONFIRM] {
            if let Err(e) = editor.confirm_action(&mut *patches) {
                warn!("{} failed: {}", editor.action(), e);
            }
        }
        if pressed[SWITCH_UNDO] {
            editor.undo_load();
        }
        if pressed[SWITCH_RESET] {
            editor.reset_patch();
        }
        let changes = editor.take_patch_changes();
        if !changes.is_empty() {
            debug!("{} patch bytes changed", changes.len());
        }
    }
}

/// Group buttons, active low. A press is a level seen low after being high
/// on the previous poll.
#[embassy_executor::task]
async fn panel_task(buttons: [Input<'static>; NUM_GROUPS], editor: &'static Mutex<CriticalSectionRawMutex, Editor>) {
    info!("panel task started");

    let mut was_down = [false; NUM_GROUPS];
    let mut ticker = Ticker::every(PANEL_POLL);
    loop {
        ticker.next().await;
        for (i, button) in buttons.iter().enumerate() {
            let down = button.is_low();
            if down && !was_down[i] {
                let group = Group::ALL[i];
                editor.lock().await.toggle_group(group);
                debug!("group {}", group);
            }
            was_down[i] = down;
        }
    }
}

// ── Main ─────────────────────────────────────────────────────────────────

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("shruti-hw-interface starting");

    // I2C_SDA → GP20, I2C_SCL → GP21
    // ENC_INT → GP19, active low
    // Group buttons → GP2..GP6 (osc, filter, mod, play, load/save), active low
    let i2c = I2c::new_async(p.I2C0, p.PIN_21, p.PIN_20, Irqs, i2c::Config::default());
    let i2c_bus = I2C_BUS.init(Mutex::new(i2c));

    let mut board = ControlBoard::new(I2cDevice::new(i2c_bus), DEFAULT_ADDRESS);
    let oled = OledDriver::new(I2cDevice::new(i2c_bus), 0x3C);
    let int_pin = Input::new(p.PIN_19, Pull::Up);
    let buttons = [
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
    ];

    // ── Editor ───────────────────────────────────────────────────────
    let display_config = DisplayConfig::default();
    let editor_config = EditorConfig {
        // Two seconds of details view at the display refresh rate.
        details_hold_ticks: (2 * display_config.update_frequency_hz) as u16,
        ..EditorConfig::default()
    };
    let patches = PATCHES.init(MemoryPatchStorage::new());
    let mut editor = Editor::with_config(BuiltinResources, editor_config);
    if let Err(e) = editor.init(&mut *patches) {
        warn!("starting from the init patch: {}", e);
    }
    let editor = EDITOR.init(Mutex::new(editor));

    // ── Control board ────────────────────────────────────────────────
    if let Err(e) = board.configure_switches().await {
        error!("failed to configure encoder switches: {}", e);
    }
    if let Err(e) = board.enable_all_interrupts().await {
        error!("failed to enable encoder interrupts: {}", e);
    }
    if board.clear_interrupt_flags().await.is_err() {
        warn!("failed to clear initial interrupt flags");
    }

    // ── Spawn ────────────────────────────────────────────────────────
    spawner.spawn(oled_task(oled, editor, display_config)).unwrap();
    spawner.spawn(control_task(int_pin, board, editor, patches)).unwrap();
    spawner.spawn(panel_task(buttons, editor)).unwrap();

    info!("all tasks spawned");
}
