use descent::metrics::confusion_matrix;
use descent::synthetic::make_blobs;
use descent::{Dataset, LinearSVC, LogObserver, MinMaxScaler};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Linear SVC Example ===\n");

    let blobs = make_blobs(200, 2, 2, 1.0, 3)?;
    // cluster 0 -> -1, cluster 1 -> +1
    let labels = blobs.labels.mapv(|l| if l == 0.0 { -1.0 } else { 1.0 });
    let dataset = Dataset::new(blobs.features, labels)?;
    let (train, test) = dataset.train_test_split(0.25, 11)?;

    let mut scaler = MinMaxScaler::new();
    let train_x = scaler.fit_transform(&train.features)?;
    let test_x = scaler.transform(&test.features)?;

    let mut svm = LinearSVC::new().shuffle(5);
    svm.fit_with_observer(&train_x, &train.targets, &mut LogObserver::new(1))?;

    println!(
        "Trained for {} epochs (converged: {})",
        svm.n_epochs.unwrap_or(0),
        svm.converged.unwrap_or(false)
    );
    if let Some(coeffs) = &svm.coefficients {
        println!("Weights: {coeffs:.4}, intercept: {:.4}", svm.intercept.unwrap_or(0.0));
    }

    let predictions = svm.predict(&test_x)?;
    println!("Train accuracy: {:.3}", svm.score(&train_x, &train.targets)?);
    println!("Test accuracy: {:.3}", svm.score(&test_x, &test.targets)?);
    println!(
        "Confusion matrix [[TN, FP], [FN, TP]]:\n{}",
        confusion_matrix(&test.targets, &predictions, 1.0)?
    );

    Ok(())
}
