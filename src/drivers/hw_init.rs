//! One-shot hardware peripheral initialization and raw register helpers.
//!
//! Configures the ADC1 oneshot unit for the probe channels and the plain
//! GPIO outputs (sensor power rail, unused chip selects) using raw
//! ESP-IDF sys calls.  Called once from `main()` before the cycle loop.
//!
//! Pins owned by typed drivers (DHT11 data, panel SPI and control lines)
//! are set up through `esp-idf-hal` in `main()` instead.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::error::PowerError;
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization or raw reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    AdcReadFailed(i32),
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::AdcReadFailed(rc) => write!(f, "ADC1 read failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

/// Outputs driven directly by this module, with their power-on level.
const OUTPUTS: [(i32, bool); 3] = [
    (pins::SENSOR_POWER_GPIO, true),
    (pins::SD_CS_GPIO, true),
    (pins::SRAM_CS_GPIO, true),
];

#[cfg(target_os = "espidf")]
pub fn init_peripherals(probe_channels: &[u8]) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the cycle loop; single-threaded.
    unsafe {
        init_adc(probe_channels)?;
        init_gpio_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(probe_channels: &[u8]) -> Result<(), HwInitError> {
    for &(pin, level) in &OUTPUTS {
        gpio_write(pin, level);
    }
    log::info!(
        "hw_init(sim): {} probe channels, ADC init skipped",
        probe_channels.len()
    );
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// cycle loop's read path.  `init_adc()` completes before the loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc(channels: &[u8]) -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    // The S3 converter is 12-bit only; `adc1_read` rescales.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for &ch in channels {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), u32::from(ch), &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }

    info!("hw_init: ADC1 configured for channels {:?}", channels);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Result<u16, HwInitError> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcReadFailed(ret));
    }
    Ok(to_calibration_scale(raw))
}

/// Bits dropped to bring a 12-bit conversion onto the 0–1023 scale the
/// calibration bounds are expressed in.
const ADC_SCALE_SHIFT: u32 = 12 - 10;

/// 12-bit ADC count → 10-bit calibration units, clamped to the valid range.
pub fn to_calibration_scale(raw: i32) -> u16 {
    (raw.clamp(0, 4095) >> ADC_SCALE_SHIFT) as u16
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    for &(pin, level) in &OUTPUTS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        unsafe { gpio_set_level(pin, u32::from(level)) };
    }

    info!("hw_init: sensor rail on, SD/SRAM deselected");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an output configured in
    // init_gpio_outputs(). Loop context only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

/// Simulated output levels, indexed by GPIO number.
#[cfg(not(target_os = "espidf"))]
static SIM_GPIO: [AtomicBool; 49] = [const { AtomicBool::new(false) }; 49];

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    if let Some(slot) = usize::try_from(pin).ok().and_then(|p| SIM_GPIO.get(p)) {
        slot.store(high, Ordering::Relaxed);
    }
}

/// Last level written to `pin` (host simulation only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_gpio_level(pin: i32) -> bool {
    usize::try_from(pin)
        .ok()
        .and_then(|p| SIM_GPIO.get(p))
        .is_some_and(|slot| slot.load(Ordering::Relaxed))
}

// ── Light sleep ───────────────────────────────────────────────

/// Light-sleep the SoC for `duration_ms`, waking on the RTC timer.
#[cfg(target_os = "espidf")]
pub fn light_sleep(duration_ms: u32) -> Result<(), PowerError> {
    // SAFETY: plain ESP-IDF sleep API calls from the loop task.
    let ret = unsafe { esp_sleep_enable_timer_wakeup(u64::from(duration_ms) * 1_000) };
    if ret != ESP_OK as i32 {
        return Err(PowerError::SleepRejected(ret));
    }
    let ret = unsafe { esp_light_sleep_start() };
    if ret != ESP_OK as i32 {
        return Err(PowerError::SleepRejected(ret));
    }
    Ok(())
}
