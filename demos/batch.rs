extern crate natural_spline;

use natural_spline::Spline;

fn main() {

    let x_min = 0.0;
    let x_max = 6.0;

    let points = [
        (x_min, 1.0),
        (1.0, -1.0),
        (2.0, 0.0),
        (4.0, 3.0),
        (5.0, 1.0),
        (x_max, 1.0)
    ];

    let spline = Spline::from_points(&points).unwrap();

    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    let x_vector: Vec<f64> = (0..=number_of_steps)
        .map(|i| x_min + step * i as f64)
        .collect();

    let result = spline.values_at(&x_vector).unwrap();

    println!("x;y");
    for (x, y) in x_vector.iter().zip(result) {
        println!("{:.2};{:.2}", x, y);
    }
    println!("area;{:.4}", spline.integrate(x_min, x_max).unwrap());
}
