use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};
use spinwheel_core::{
    Point, RotationDirection, RotationStatus, Segment, SpeedTier, TextOrientation, Wheel,
    WheelConfig, WheelListener,
};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(feature = "skia")]
mod snapshot;

/// Spin a prize wheel headlessly
#[derive(Parser, Debug)]
#[command(name = "spinwheel")]
#[command(about = "Simulates targeted spins of a segmented prize wheel", long_about = None)]
struct Args {
    /// Number of segments, labelled 1..=N unless `--labels` is given
    #[arg(short, long, default_value_t = 12)]
    segments: usize,

    /// Segment labels, comma separated
    #[arg(short, long, value_delimiter = ',')]
    labels: Option<Vec<String>>,

    /// Segment to land on for every spin (random when omitted)
    #[arg(short, long)]
    target: Option<usize>,

    /// Number of consecutive spins
    #[arg(short = 'n', long, default_value_t = 1)]
    spins: u32,

    #[arg(long, value_enum, default_value_t = Direction::Clockwise)]
    direction: Direction,

    #[arg(long, value_enum, default_value_t = Speed::Normal)]
    speed: Speed,

    /// Multiplier applied to the speed tier's turns
    #[arg(long, default_value_t = 1.0)]
    speed_multiplier: f64,

    /// Spin duration in milliseconds
    #[arg(long, default_value_t = 5000)]
    duration_ms: u64,

    /// Stop on the slice center instead of a random point inside it
    #[arg(long)]
    centered: bool,

    #[arg(long, value_enum, default_value_t = Orientation::VerticalToCenter)]
    text_orientation: Orientation,

    /// Draw bare wedges and labels only (no stroke, separators, corner or center points)
    #[arg(long)]
    plain: bool,

    /// Simulation frame rate
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Wheel radius in pixels for render output
    #[arg(long, default_value_t = 240.0)]
    radius: f64,

    /// Directory receiving one PNG per landed spin
    #[cfg(feature = "skia")]
    #[arg(long)]
    png_dir: Option<std::path::PathBuf>,

    /// Also snapshot every N frames while spinning (0 keeps only landed frames)
    #[cfg(feature = "skia")]
    #[arg(long, default_value_t = 0)]
    png_every: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, default_value = "info")]
    log_level: Level,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    Clockwise,
    CounterClockwise,
}

impl From<Direction> for RotationDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Clockwise => RotationDirection::Clockwise,
            Direction::CounterClockwise => RotationDirection::CounterClockwise,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Speed {
    Slow,
    Normal,
    Fast,
}

impl From<Speed> for SpeedTier {
    fn from(value: Speed) -> Self {
        match value {
            Speed::Slow => SpeedTier::Slow,
            Speed::Normal => SpeedTier::Normal,
            Speed::Fast => SpeedTier::Fast,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Orientation {
    Horizontal,
    Vertical,
    VerticalToCenter,
    VerticalToCorner,
}

impl From<Orientation> for TextOrientation {
    fn from(value: Orientation) -> Self {
        match value {
            Orientation::Horizontal => TextOrientation::Horizontal,
            Orientation::Vertical => TextOrientation::Vertical,
            Orientation::VerticalToCenter => TextOrientation::VerticalToCenter,
            Orientation::VerticalToCorner => TextOrientation::VerticalToCorner,
        }
    }
}

/// Space around the wheel so the pointer above the rim stays on the canvas.
const FRAME_MARGIN: f64 = 32.0;

/// Wheel center on a square canvas of side `2 * center.x`.
fn frame_center(radius: f64) -> Point {
    Point::new(radius + FRAME_MARGIN, radius + FRAME_MARGIN)
}

/// Downward pointer at 12 o'clock: tip just inside the rim, base above it.
#[cfg_attr(not(feature = "skia"), allow(dead_code))]
fn pointer_triangle(center: Point, radius: f64) -> [Point; 3] {
    let tip = Point::new(center.x, center.y - radius + 14.0);
    [
        tip,
        Point::new(tip.x - 12.0, tip.y - 22.0),
        Point::new(tip.x + 12.0, tip.y - 22.0),
    ]
}

/// Forwards wheel notifications to the log.
struct TracingListener;

impl WheelListener for TracingListener {
    fn on_status_changed(&mut self, status: RotationStatus) {
        debug!(%status, "wheel status changed");
    }

    fn on_rotation_complete(&mut self, index: usize, segment: &Segment) {
        info!(index, id = segment.id, label = %segment.text, "wheel stopped");
    }
}

impl Args {
    fn wheel_config(&self) -> WheelConfig {
        let segments = match &self.labels {
            Some(labels) => labels
                .iter()
                .enumerate()
                .map(|(i, label)| Segment::new(i as u32, label.trim()))
                .collect(),
            None => (0..self.segments)
                .map(|i| Segment::new(i as u32, (i + 1).to_string()))
                .collect(),
        };

        let mut config = WheelConfig::with_segments(segments);
        config.rotation_direction = self.direction.into();
        config.speed_tier = self.speed.into();
        config.speed_multiplier = self.speed_multiplier;
        config.spin_duration = Duration::from_millis(self.duration_ms);
        config.stop_center_of_segment = self.centered;
        config.text_orientation = self.text_orientation.into();
        let decorated = !self.plain;
        config.stroke.enabled = decorated;
        config.separator.enabled = decorated;
        config.corner_points.enabled = decorated;
        config.center_point.enabled = decorated;
        config.center_point.radius = self.radius / 6.0;
        config
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if args.fps == 0 {
        bail!("--fps must be positive");
    }
    let tick = Duration::from_secs(1) / args.fps;

    let mut wheel = Wheel::with_listener(args.wheel_config(), TracingListener)
        .context("invalid wheel configuration")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    info!(seed, segments = wheel.config().segment_count(), "wheel ready");

    let center = frame_center(args.radius);

    for round in 1..=args.spins {
        let ticket = match args.target {
            Some(target) => wheel.spin(target, &mut rng),
            None => wheel.spin_random(&mut rng),
        }
        .with_context(|| format!("spin {round} rejected"))?;
        debug!(
            id = %ticket.id,
            offset = ticket.plan.offset,
            rotation = ticket.plan.rotation,
            "spin planned"
        );

        let mut frames = 0u64;
        let landed = loop {
            frames += 1;
            if let Some(index) = wheel.advance(tick) {
                break index;
            }
            #[cfg(feature = "skia")]
            if let Some(dir) = &args.png_dir
                && args.png_every > 0
                && frames % args.png_every == 0
            {
                let path = dir.join(format!("spin-{round:03}-frame-{frames:05}.png"));
                let primitives = wheel.frame(center, args.radius, &mut rng);
                snapshot::save_png(&primitives, wheel.angle(), center, args.radius, &path)?;
                debug!(path = %path.display(), "frame snapshot written");
            }
        };

        let segment = &wheel.config().segments[landed];
        println!(
            "{}: landed on #{landed} \"{}\" after {frames} frames at {:.2} deg",
            ticket.id,
            segment.text,
            wheel.angle()
        );

        let primitives = wheel.frame(center, args.radius, &mut rng);
        debug!(primitives = primitives.len(), "frame built");

        #[cfg(feature = "skia")]
        if let Some(dir) = &args.png_dir {
            let path = dir.join(format!("spin-{round:03}.png"));
            snapshot::save_png(&primitives, wheel.angle(), center, args.radius, &path)?;
            info!(path = %path.display(), "snapshot written");
        }
    }

    Ok(())
}
