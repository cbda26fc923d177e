use std::f64::consts::FRAC_PI_2;

use refindex_core::constants::AMBIENT_INDEX;
use refindex_core::math::{refract, snell_argument, transmit};
use refindex_core::{Beam, Medium, Point};

use crate::error::{Interface, TraceError};
use crate::options::{TotalReflectionPolicy, TraceOptions};
use crate::trajectory::{Termination, Trajectory};

/// Outcome of a refraction attempt once the policy has been applied.
enum Refraction {
    Angle(f64),
    Stop,
}

fn refract_or_policy(
    n1: f64,
    n2: f64,
    theta: f64,
    interface: Interface,
    options: &TraceOptions,
) -> Result<Refraction, TraceError> {
    if let Some(angle) = refract(n1, n2, theta) {
        return Ok(Refraction::Angle(angle));
    }
    let argument = snell_argument(n1, n2, theta);
    match options.on_total_reflection {
        TotalReflectionPolicy::Fail => Err(TraceError::OutOfDomain {
            interface,
            argument,
        }),
        TotalReflectionPolicy::Truncate => {
            log::warn!("Total internal reflection at {interface} (argument {argument:.4}), truncating");
            Ok(Refraction::Stop)
        }
    }
}

/// Trace `beam` through `medium`.
///
/// The ray enters through the left wall at `(0, y_0)`, refracts into the layer
/// holding `y_0`, then refracts at every horizontal interface on its way down
/// until it reaches the floor, leaves through the right side, or hits an
/// interface Snell's law cannot cross.
pub fn trace(medium: &Medium, beam: &Beam, options: &TraceOptions) -> Result<Trajectory, TraceError> {
    let container = medium.container();
    beam.check_within(container)?;

    let width = container.width();
    let thickness = medium.layer_thickness();
    let layers = medium.layers();

    let mut trajectory = Trajectory::start(beam.entry_point());

    let entry_index = medium.layer_index_from_y(beam.y_0());
    let entry_layer = &layers[entry_index];

    // Side wall: vertical interface, so the refracted angle is measured from
    // the horizontal and has to be turned into an interface-normal angle.
    let mut theta = if beam.angle() == FRAC_PI_2 {
        // Grazing down the wall, the ray never crosses it.
        trajectory.push(Point::new(0.0, entry_layer.y_bottom), 0.0);
        0.0
    } else {
        let interface = Interface::Wall { layer: entry_index };
        let refracted = match refract_or_policy(AMBIENT_INDEX, entry_layer.n, beam.angle(), interface, options)? {
            Refraction::Angle(angle) => angle,
            Refraction::Stop => return Ok(trajectory.finish(Termination::TotalInternalReflection)),
        };
        if refracted == 0.0 {
            trajectory.push(Point::new(width, beam.y_0()), FRAC_PI_2);
            return Ok(trajectory.finish(Termination::Parallel));
        }
        let x_offset = ((beam.y_0() - entry_layer.y_bottom) / refracted.tan()).abs();
        let theta = FRAC_PI_2 - refracted;
        trajectory.push(Point::new(x_offset, entry_layer.y_bottom), theta);
        if x_offset > width {
            return Ok(trajectory.finish(Termination::ExitedRight));
        }
        theta
    };

    let mut point = trajectory.last();
    let mut index = entry_index;
    loop {
        // The bottom of the last layer is the floor, the ray leaves the gradient here.
        if medium.is_last(index) {
            return Ok(trajectory.finish(Termination::Floor));
        }
        let current = &layers[index];
        let next = &layers[index + 1];

        let interface = Interface::Layers {
            upper: index,
            lower: index + 1,
        };
        let refracted = match refract_or_policy(current.n, next.n, theta, interface, options)? {
            Refraction::Angle(angle) => angle,
            Refraction::Stop => return Ok(trajectory.finish(Termination::TotalInternalReflection)),
        };

        point = transmit(point, thickness, refracted);
        // Snap onto the stored boundary so rounding never drifts between layers.
        point.y = next.y_bottom;
        trajectory.push(point, refracted);
        log::debug!(
            "Crossed layer {} (n={:.4}) at ({:.4}, {:.4}), angle {:.4}",
            index + 1,
            next.n,
            point.x,
            point.y,
            refracted
        );

        if point.x > width {
            return Ok(trajectory.finish(Termination::ExitedRight));
        }

        theta = refracted;
        index += 1;
    }
}
