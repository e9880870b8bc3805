use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::f64::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use xyseries_spectrum::audio::buffer::SampleRingBuffer;
use xyseries_spectrum::audio::input::quantize_u8;
use xyseries_spectrum::audio::{MonitorConfig, SpectrumMonitor};
use xyseries_spectrum::spectrum::analysis::{bin_width_hz, peak, to_db};
use xyseries_spectrum::spectrum::{MagnitudeSpan, PipelineConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Print the spectral peak of live or synthetic audio", long_about = None)]
struct Args {
    /// window capacity and FFT length (power of two)
    #[arg(long, default_value_t = 1024)]
    capacity: usize,

    /// samples per write to the series device
    #[arg(long, default_value_t = 320)]
    chunk: usize,

    /// frequency of bin `capacity` in Hz (defaults to the sample rate)
    #[arg(long)]
    max_frequency: Option<f64>,

    /// only read back bins below the FFT's Nyquist bin
    #[arg(long)]
    transform_span: bool,

    /// feed a sine of this frequency instead of the microphone
    #[arg(long)]
    synthetic: Option<f64>,

    /// sample rate of the synthetic source
    #[arg(long, default_value_t = 8000)]
    sample_rate: u32,

    /// seconds to run
    #[arg(long, default_value_t = 5.0)]
    duration: f64,

    /// list input devices and exit
    #[arg(long)]
    list_devices: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_devices {
        for name in SpectrumMonitor::list_devices()? {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut config = MonitorConfig {
        chunk_size: args.chunk,
        pipeline: PipelineConfig {
            capacity: args.capacity,
            max_frequency_hz: args.max_frequency.unwrap_or(f64::from(args.sample_rate)),
            magnitude_span: if args.transform_span {
                MagnitudeSpan::Transform
            } else {
                MagnitudeSpan::Window
            },
        },
        ..MonitorConfig::default()
    };

    let generator_running = Arc::new(AtomicBool::new(true));
    let mut generator = None;

    let mut monitor = match args.synthetic {
        Some(freq) => {
            let mut monitor = SpectrumMonitor::new(config.clone()).context("invalid configuration")?;
            let (producer, consumer) = SampleRingBuffer::new(config.ring_capacity).split();
            monitor.start_with_consumer(consumer)?;

            let running = Arc::clone(&generator_running);
            let rate = f64::from(args.sample_rate.max(1));
            let chunk = args.chunk;
            info!("Synthetic {} Hz sine at {} Hz", freq, rate);

            generator = Some(std::thread::spawn(move || {
                let mut producer = producer;
                let mut n: u64 = 0;
                let period = Duration::from_secs_f64(chunk as f64 / rate);
                while running.load(Ordering::SeqCst) {
                    let samples: Vec<u8> = (0..chunk)
                        .map(|k| {
                            let t = (n + k as u64) as f64 / rate;
                            quantize_u8((0.8 * (2.0 * PI * freq * t).sin()) as f32)
                        })
                        .collect();
                    n += chunk as u64;
                    producer.write(&samples);
                    std::thread::sleep(period);
                }
            }));

            monitor
        }
        None => {
            let mut monitor = SpectrumMonitor::new(config.clone()).context("invalid configuration")?;
            let device = monitor.start().context("failed to start capture")?;

            if args.max_frequency.is_none() {
                // Rebuild with the device's real rate on the frequency axis
                monitor.stop();
                config.pipeline.max_frequency_hz = f64::from(device.sample_rate);
                monitor = SpectrumMonitor::new(config.clone())?;
                monitor.start()?;
            }

            info!("Monitoring '{}'", device.name);
            monitor
        }
    };

    let resolution = bin_width_hz(&config.pipeline);
    let deadline = Instant::now() + Duration::from_secs_f64(args.duration.max(0.0));

    while Instant::now() < deadline {
        if let Some(frame) = monitor.get_results() {
            match peak(&frame.spectrum, &config.pipeline) {
                Some(p) => println!(
                    "peak {:8.1} Hz (±{:.1})  magnitude {:10.1} ({:6.1} dB)  window {}",
                    p.x,
                    resolution / 2.0,
                    p.y,
                    to_db(p.y, 1.0),
                    frame.waveform.len()
                ),
                None => println!("window {} (no spectrum yet)", frame.waveform.len()),
            }
        }
        std::thread::sleep(Duration::from_millis(100));
    }

    generator_running.store(false, Ordering::SeqCst);
    if let Some(handle) = generator {
        let _ = handle.join();
    }
    monitor.stop();
    info!("Processed {} chunks", monitor.frames_processed());

    Ok(())
}
