// Polar alignment error from three plate-solved positions taken while the RA
// axis turns. The positions trace a circle around the axis the mount really
// rotates about; the circle center is compared with the true pole at the site.

use crate::hardware::{AdjustAxis, Mount};
use crate::states::Capabilities;
use anyhow::{bail, ensure};

/// Azimuth corrections the adjuster can reach from its home position.
pub const AZIMUTH_RANGE_ARCMIN: f64 = 120.0;
/// Largest upward altitude correction. Downward moves are not limited.
pub const ALTITUDE_MAX_ARCMIN: f64 = 168.0;

/// A sky position in degrees.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct SkyPoint {
    pub ra: f64,
    pub dec: f64,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Site {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct AlignmentError {
    /// Where the mount's RA axis points, Earth-fixed.
    pub axis: SkyPoint,
    pub azimuth_arcmin: f64,
    pub altitude_arcmin: f64,
}

/// Which corrections [`AlignmentError::apply`] sent to the mount.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct Applied {
    pub azimuth: bool,
    pub altitude: bool,
}

// Polar projection, DEC treated as a plain distance from the pole
fn project(point: SkyPoint) -> (f64, f64) {
    let distance = 90.0 - point.dec;
    let ra = point.ra.to_radians();
    (distance * ra.cos(), distance * ra.sin())
}

fn circumcenter(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> anyhow::Result<(f64, f64)> {
    let d = 2.0 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1));
    ensure!(d.abs() > 1e-9, "reference points are collinear");

    let a2 = a.0 * a.0 + a.1 * a.1;
    let b2 = b.0 * b.0 + b.1 * b.1;
    let c2 = c.0 * c.0 + c.1 * c.1;
    let x = (a2 * (b.1 - c.1) + b2 * (c.1 - a.1) + c2 * (a.1 - b.1)) / d;
    let y = (a2 * (c.0 - b.0) + b2 * (a.0 - c.0) + c2 * (b.0 - a.0)) / d;
    Ok((x, y))
}

/// Azimuth and altitude in degrees of an Earth-fixed direction seen from `site`.
fn horizontal(direction: SkyPoint, site: Site) -> (f64, f64) {
    let (ra, dec) = (direction.ra.to_radians(), direction.dec.to_radians());
    let v = [dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin()];

    let (lat, lon) = (site.latitude.to_radians(), site.longitude.to_radians());
    let east = [-lon.sin(), lon.cos(), 0.0];
    let north = [-lat.sin() * lon.cos(), -lat.sin() * lon.sin(), lat.cos()];
    let up = [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()];

    let dot = |w: [f64; 3]| v[0] * w[0] + v[1] * w[1] + v[2] * w[2];
    let altitude = dot(up).clamp(-1.0, 1.0).asin().to_degrees();
    let azimuth = dot(east).atan2(dot(north)).to_degrees().rem_euclid(360.0);
    (azimuth, altitude)
}

fn signed_degrees(angle: f64) -> f64 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Work out how far the RA axis is from the pole, in arc-minutes of azimuth
/// and altitude correction.
pub fn solve(points: [SkyPoint; 3], site: Site) -> anyhow::Result<AlignmentError> {
    for point in points {
        ensure!(
            point.ra.is_finite() && point.dec.is_finite(),
            "reference point {:?} is not finite",
            point
        );
    }
    ensure!(
        site.latitude.is_finite() && site.longitude.is_finite(),
        "site position is not finite"
    );

    let [a, b, c] = points.map(project);
    let (x, y) = circumcenter(a, b, c)?;
    let axis = SkyPoint {
        ra: y.atan2(x).to_degrees().rem_euclid(360.0),
        dec: 90.0 - x.hypot(y),
    };
    log::info!("Current alignment RA {:.4} DEC {:.4}", axis.ra, axis.dec);

    let pole = SkyPoint { ra: 0.0, dec: 90.0 };
    let (pole_az, pole_alt) = horizontal(pole, site);
    let (axis_az, axis_alt) = horizontal(axis, site);

    let error = AlignmentError {
        axis,
        azimuth_arcmin: (signed_degrees(pole_az) - signed_degrees(axis_az)) * 60.0,
        altitude_arcmin: (pole_alt - axis_alt) * 60.0,
    };
    log::info!(
        "Azimuth correction {:.4} arcmin, altitude correction {:.4} arcmin",
        error.azimuth_arcmin,
        error.altitude_arcmin
    );
    Ok(error)
}

impl AlignmentError {
    pub fn azimuth_in_range(&self) -> bool {
        self.azimuth_arcmin.abs() <= AZIMUTH_RANGE_ARCMIN
    }

    pub fn altitude_in_range(&self) -> bool {
        self.altitude_arcmin <= ALTITUDE_MAX_ARCMIN
    }

    /// Send the corrections to the azimuth/altitude motors.
    ///
    /// Out-of-range axes are skipped unless `force` is set.
    pub fn apply(
        &self,
        mount: &mut dyn Mount,
        capabilities: Capabilities,
        force: bool,
    ) -> anyhow::Result<Applied> {
        if !capabilities.azimuth_altitude_motors {
            bail!("mount has no azimuth/altitude motors");
        }

        let mut applied = Applied::default();
        let corrections = [
            (AdjustAxis::Azimuth, self.azimuth_arcmin, self.azimuth_in_range()),
            (AdjustAxis::Altitude, self.altitude_arcmin, self.altitude_in_range()),
        ];
        for (axis, arcmin, in_range) in corrections {
            if !in_range && !force {
                log::warn!(
                    "{:?} correction of {:.1} arcmin is beyond the adjuster range, skipping",
                    axis,
                    arcmin
                );
                continue;
            }
            mount.move_by(axis, arcmin as f32);
            match axis {
                AdjustAxis::Azimuth => applied.azimuth = true,
                AdjustAxis::Altitude => applied.altitude = true,
            }
        }
        Ok(applied)
    }
}
