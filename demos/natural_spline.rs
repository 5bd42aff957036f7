extern crate natural_spline;

use natural_spline::Spline;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let y = [10.0, 30.0, 50.0, -40.0, -60.0, 0.0, 10.0, 20.0];

    let spline = Spline::from_xy(&x, &y).unwrap();

    info!(
        first = spline.second_derivative_at(x[0]).unwrap(),
        last = spline.second_derivative_at(x[x.len() - 1]).unwrap(),
        "second derivative at endpoints"
    );

    for point in spline.stationary_point_details() {
        info!(
            "Critical point {:.4} interpolates at {:.4} with first derivative {:.2e} and second derivative {:.4} ({:?})",
            point.x,
            point.value,
            point.first_derivative,
            point.second_derivative,
            point.kind()
        );
    }

    let outside = 15.0;
    info!(
        "Point {} extrapolates to value {:.4}",
        outside,
        spline.value_at(outside).unwrap()
    );
}
