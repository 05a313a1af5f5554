use descent::metrics::{mean_absolute_error, mean_squared_error};
use descent::{Dataset, History, LinearRegression, MinMaxScaler, Vector};
use ndarray_rand::rand_distr::{Normal, Uniform};
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Linear Regression Example ===\n");

    // y = 3·x1 − 2·x2 + 5 plus noise
    let mut rng = StdRng::seed_from_u64(7);
    let features = descent::Matrix::random_using((200, 2), Uniform::new(0.0, 10.0), &mut rng);
    let noise = Vector::random_using(200, Normal::new(0.0, 0.5).map_err(|e| e.to_string())?, &mut rng);
    let targets = features.column(0).mapv(|v| 3.0 * v) - features.column(1).mapv(|v| 2.0 * v) + 5.0 + noise;

    let dataset = Dataset::new(features, targets)?;
    println!("Dataset: {} samples, {} features", dataset.n_samples(), dataset.n_features());

    let (train, test) = dataset.train_test_split(0.2, 42)?;

    let mut scaler = MinMaxScaler::new();
    let train_x = scaler.fit_transform(&train.features)?;
    let test_x = scaler.transform(&test.features)?;

    let mut history = History::new();
    let mut model = LinearRegression::new().learning_rate(0.1).max_iterations(10_000);
    model.fit_with_observer(&train_x, &train.targets, &mut history)?;

    println!(
        "Stopped after {} iterations (converged: {})",
        model.n_iterations.unwrap_or(0),
        model.converged.unwrap_or(false)
    );
    if let (Some(first), Some(last)) = (history.losses().first(), history.losses().last()) {
        println!("Training loss: {first:.4} -> {last:.4}");
    }

    let predictions = model.predict(&test_x)?;
    println!("\nTest results:");
    println!("  R² score: {:.4}", model.score(&test_x, &test.targets)?);
    println!("  MSE: {:.4}", mean_squared_error(&test.targets, &predictions)?);
    println!("  MAE: {:.4}", mean_absolute_error(&test.targets, &predictions)?);

    if let Some(coeffs) = &model.coefficients {
        println!("  Coefficients (scaled features): {coeffs:.4}");
        println!("  Intercept: {:.4}", model.intercept.unwrap_or(0.0));
    }

    println!("\nFirst test predictions:");
    for (pred, actual) in predictions.iter().zip(test.targets.iter()).take(5) {
        println!("  predicted {pred:8.3}  actual {actual:8.3}");
    }

    Ok(())
}
