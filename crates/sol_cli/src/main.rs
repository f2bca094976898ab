//! `sol`: command-line front end for the Sun, Moon, planet, star,
//! eclipse, meteor-shower and tide calculators.
//!
//! Environment variables:
//! - `RUST_LOG`: log level (default: info)

mod config;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use clap::{Args, Parser, Subcommand};
use sol_frames::GeoLocation;
use sol_locators::{
    MeteorShower, MoonLocator, ObservationOptions, Planet, PlanetLocator, Star, StarLocator,
    SunLocator, horizon_position,
};
use sol_search::{
    EclipseConfig, LunarEclipseKind, RiseSetConfig, RiseSetTransitTimes, TwilightMode,
    daylight_length, moon_events, next_lunar_eclipse, next_meteor_shower_peak, planet_events,
    season_at, sun_events,
};
use sol_tides::{HarmonicWaterLevelCalculator, tidal_range, tides_between};
use sol_time::{UniversalTime, parse_utc_offset};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use crate::config::SiteFile;

#[derive(Parser)]
#[command(name = "sol", about = "Sun, Moon, planets, eclipses, meteors and tides")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sun events for each twilight mode and the current position
    Sun {
        #[command(flatten)]
        observer: ObserverArgs,
        /// Civil date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,
        /// Apply atmospheric refraction
        #[arg(long)]
        refraction: bool,
    },
    /// Moon events, phase, illumination and distance
    Moon {
        #[command(flatten)]
        observer: ObserverArgs,
        /// Civil date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,
    },
    /// Planet position, brightness and events
    Planet {
        /// Planet name, e.g. mars
        name: String,
        #[command(flatten)]
        observer: ObserverArgs,
        /// Instant (RFC 3339), default now
        #[arg(long)]
        at: Option<String>,
    },
    /// Star position, refracted
    Star {
        /// Star name, e.g. betelgeuse
        name: String,
        #[command(flatten)]
        observer: ObserverArgs,
        /// Instant (RFC 3339), default now
        #[arg(long)]
        at: Option<String>,
    },
    /// Next lunar eclipse visible from the observer
    Eclipse {
        #[command(flatten)]
        observer: ObserverArgs,
        /// Search start (RFC 3339), default now
        #[arg(long)]
        after: Option<String>,
        /// Only total eclipses
        #[arg(long)]
        total: bool,
    },
    /// Next peak of a meteor shower
    Meteor {
        /// Shower name, e.g. perseids
        shower: String,
        #[command(flatten)]
        observer: ObserverArgs,
        /// Search start (RFC 3339), default now
        #[arg(long)]
        after: Option<String>,
    },
    /// High and low tides for a day
    Tide {
        /// Station file with [[harmonics]]
        #[arg(long)]
        station: PathBuf,
        /// Civil date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// UTC offset of the civil day, e.g. -05:00
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
struct ObserverArgs {
    /// Latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,
    /// Observer file with a [location] table
    #[arg(long)]
    observer: Option<PathBuf>,
    /// UTC offset of the civil day, e.g. -05:00
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<String>,
}

/// Resolved observer: flags override file values.
#[derive(Debug, Clone, Copy)]
struct Site {
    location: GeoLocation,
    offset: FixedOffset,
}

impl ObserverArgs {
    fn resolve(&self) -> Result<Site> {
        let file = match &self.observer {
            Some(path) => Some(SiteFile::load(path)?),
            None => None,
        };
        let from_file = file.as_ref().and_then(SiteFile::location);

        let latitude = self
            .lat
            .or(from_file.map(|l| l.latitude_deg))
            .ok_or_else(|| anyhow!("latitude required: pass --lat or --observer"))?;
        let longitude = self
            .lon
            .or(from_file.map(|l| l.longitude_deg))
            .ok_or_else(|| anyhow!("longitude required: pass --lon or --observer"))?;
        let location = GeoLocation::new(latitude, longitude);
        location.validate().map_err(|e| anyhow!(e))?;

        let offset_text = self
            .offset
            .as_deref()
            .or(file.as_ref().and_then(SiteFile::offset));
        let offset = resolve_offset(offset_text)?;
        Ok(Site { location, offset })
    }
}

fn resolve_offset(text: Option<&str>) -> Result<FixedOffset> {
    match text {
        Some(t) => parse_utc_offset(t).context("--offset"),
        None => Ok(Utc.fix()),
    }
}

// ---------------------------------------------------------------------------
// Parsing and formatting helpers
// ---------------------------------------------------------------------------

fn now() -> UniversalTime {
    UniversalTime::from_utc(&Utc::now())
}

fn parse_instant(text: Option<&str>) -> Result<UniversalTime> {
    match text {
        Some(t) => {
            let dt = DateTime::parse_from_rfc3339(t)
                .with_context(|| format!("expected RFC 3339 instant, got '{t}'"))?;
            Ok(UniversalTime::from_datetime(&dt))
        }
        None => Ok(now()),
    }
}

fn parse_date(text: Option<&str>, offset: FixedOffset) -> Result<NaiveDate> {
    match text {
        Some(t) => NaiveDate::parse_from_str(t, "%Y-%m-%d")
            .with_context(|| format!("expected YYYY-MM-DD, got '{t}'")),
        None => Ok(now().local_date(offset)?),
    }
}

fn format_time(ut: Option<UniversalTime>, offset: FixedOffset) -> String {
    match ut.map(|t| t.to_offset(offset)) {
        Some(Ok(dt)) => dt.format("%Y-%m-%d %H:%M %:z").to_string(),
        Some(Err(_)) => "out of range".to_string(),
        None => "-".to_string(),
    }
}

fn print_events(label: &str, events: &RiseSetTransitTimes, offset: FixedOffset) {
    println!(
        "{label:<14} rise {}  transit {}  set {}",
        format_time(events.rise, offset),
        format_time(events.transit, offset),
        format_time(events.set, offset),
    );
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn run_sun(site: Site, date: NaiveDate, refraction: bool) -> Result<()> {
    let config = RiseSetConfig {
        with_refraction: refraction,
        ..RiseSetConfig::default()
    };
    for (label, mode) in [
        ("actual", TwilightMode::Actual),
        ("civil", TwilightMode::Civil),
        ("nautical", TwilightMode::Nautical),
        ("astronomical", TwilightMode::Astronomical),
    ] {
        let events = sun_events(date, site.offset, &site.location, mode, &config)?;
        print_events(label, &events, site.offset);
    }
    let hours = daylight_length(date, site.offset, &site.location, TwilightMode::Actual, &config)?;
    println!("daylight       {hours:.2} h");

    let at = now();
    let options = ObservationOptions { with_refraction: refraction, with_parallax: false };
    let position = horizon_position(&SunLocator, at, &site.location, options);
    println!(
        "now            altitude {:.2}°  azimuth {:.2}°  season {:?}",
        position.altitude_deg,
        position.azimuth_deg,
        season_at(at, &site.location)
    );
    Ok(())
}

fn run_moon(site: Site, date: NaiveDate) -> Result<()> {
    let events = moon_events(date, site.offset, &site.location, &RiseSetConfig::default())?;
    print_events("moon", &events, site.offset);

    let at = now();
    let phase = MoonLocator.phase(at);
    let position = horizon_position(&MoonLocator, at, &site.location, ObservationOptions::APPARENT);
    println!(
        "phase          {:?} ({:.1}°), {:.1}% illuminated",
        phase.phase, phase.angle_deg, phase.illumination
    );
    println!("distance       {:.0} km", MoonLocator.distance(at));
    println!(
        "now            altitude {:.2}°  azimuth {:.2}°  tilt {:.1}°",
        position.altitude_deg,
        position.azimuth_deg,
        MoonLocator.tilt_deg(at, &site.location)
    );
    Ok(())
}

fn run_planet(name: &str, site: Site, at: UniversalTime) -> Result<()> {
    let planet = Planet::from_name(name).ok_or_else(|| anyhow!("unknown planet '{name}'"))?;
    if planet == Planet::Earth {
        bail!("the observer is on Earth");
    }
    let locator = PlanetLocator::new(planet);
    let position = horizon_position(&locator, at, &site.location, ObservationOptions::GEOMETRIC);
    println!("{} at {}", planet.name(), format_time(Some(at), site.offset));
    println!(
        "position       altitude {:.2}°  azimuth {:.2}°",
        position.altitude_deg, position.azimuth_deg
    );
    println!("magnitude      {:.1}", locator.magnitude(at));
    println!("distance       {:.3} AU", locator.distance_au(at));

    let date = at.local_date(site.offset)?;
    let events = planet_events(planet, date, site.offset, &site.location, &RiseSetConfig::default())?;
    print_events("events", &events, site.offset);
    Ok(())
}

fn run_star(name: &str, site: Site, at: UniversalTime) -> Result<()> {
    let star = Star::from_name(name).ok_or_else(|| anyhow!("unknown star '{name}'"))?;
    let options = ObservationOptions { with_refraction: true, with_parallax: false };
    let position = horizon_position(&StarLocator::new(star), at, &site.location, options);
    println!("{} at {}", star.name(), format_time(Some(at), site.offset));
    println!(
        "position       altitude {:.2}°  azimuth {:.2}°",
        position.altitude_deg, position.azimuth_deg
    );
    Ok(())
}

fn run_eclipse(site: Site, after: UniversalTime, total: bool) -> Result<()> {
    let kind = if total { LunarEclipseKind::Total } else { LunarEclipseKind::Partial };
    let config = EclipseConfig::default();
    match next_lunar_eclipse(after, &site.location, kind, &config)? {
        Some(eclipse) => {
            println!("{:?} lunar eclipse", eclipse.kind);
            println!("start          {}", format_time(Some(eclipse.start), site.offset));
            println!("maximum        {}", format_time(Some(eclipse.maximum), site.offset));
            println!("end            {}", format_time(Some(eclipse.end), site.offset));
            println!("magnitude      {:.3}", eclipse.magnitude);
            println!("obscuration    {:.1}%", eclipse.obscuration * 100.0);
        }
        None => println!("no visible eclipse in the next {} lunations", config.max_lunations),
    }
    Ok(())
}

fn run_meteor(name: &str, site: Site, after: UniversalTime) -> Result<()> {
    let shower =
        MeteorShower::from_name(name).ok_or_else(|| anyhow!("unknown meteor shower '{name}'"))?;
    match next_meteor_shower_peak(shower, after, site.offset, &site.location)? {
        Some(peak) => {
            println!("{} (ZHR {})", shower.name(), shower.zenithal_hourly_rate());
            println!("start          {}", format_time(Some(peak.start), site.offset));
            println!("peak           {}", format_time(Some(peak.peak), site.offset));
            println!("end            {}", format_time(Some(peak.end), site.offset));
        }
        None => println!("{} radiant stays below the horizon on its peak night", shower.name()),
    }
    Ok(())
}

fn run_tide(station: &Path, date: &str, offset: Option<&str>) -> Result<()> {
    let file = SiteFile::load(station)?;
    let offset = resolve_offset(offset.or(file.offset()))?;
    let date = parse_date(Some(date), offset)?;
    let calculator = HarmonicWaterLevelCalculator::new(file.harmonics()?)
        .with_context(|| format!("harmonics in {}", station.display()))?;

    let start = UniversalTime::start_of_local_day(date, offset);
    let end = start.plus_days(1.0);
    let tides = tides_between(&calculator, start, end);
    debug!(count = tides.len(), "tides found");

    println!("{date}: {:?} range", tidal_range(start.plus_hours(12.0)));
    for tide in tides {
        let kind = if tide.is_high { "high" } else { "low" };
        println!("{kind:<5} {}  {:+.2}", format_time(Some(tide.time), offset), tide.height);
    }
    Ok(())
}

fn init_tracing() {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sun { observer, date, refraction } => {
            let site = observer.resolve()?;
            debug!(?site, "observer");
            let date = parse_date(date.as_deref(), site.offset)?;
            run_sun(site, date, refraction)
        }
        Commands::Moon { observer, date } => {
            let site = observer.resolve()?;
            let date = parse_date(date.as_deref(), site.offset)?;
            run_moon(site, date)
        }
        Commands::Planet { name, observer, at } => {
            let site = observer.resolve()?;
            run_planet(&name, site, parse_instant(at.as_deref())?)
        }
        Commands::Star { name, observer, at } => {
            let site = observer.resolve()?;
            run_star(&name, site, parse_instant(at.as_deref())?)
        }
        Commands::Eclipse { observer, after, total } => {
            let site = observer.resolve()?;
            let after = parse_instant(after.as_deref())?;
            info!(%after, total, "searching for lunar eclipse");
            run_eclipse(site, after, total)
        }
        Commands::Meteor { shower, observer, after } => {
            let site = observer.resolve()?;
            run_meteor(&shower, site, parse_instant(after.as_deref())?)
        }
        Commands::Tide { station, date, offset } => run_tide(&station, &date, offset.as_deref()),
    }
}
