use descent::synthetic::make_blobs;
use descent::{Dataset, Link, LogObserver, MinMaxScaler, MultinomialRegression};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Multinomial Classification Example ===\n");

    let blobs = make_blobs(300, 4, 2, 1.5, 17)?;
    println!("Cluster centres:\n{:.3}", blobs.centers);

    let dataset = Dataset::new(blobs.features, blobs.labels)?;
    let (train, test) = dataset.train_test_split(0.2, 42)?;

    let mut scaler = MinMaxScaler::new();
    let train_x = scaler.fit_transform(&train.features)?;
    let test_x = scaler.transform(&test.features)?;

    for link in [Link::Sigmoid, Link::Softmax] {
        let mut model = MultinomialRegression::new()
            .link(link)
            .learning_rate(0.5)
            .max_iterations(5000);
        model.fit_with_observer(&train_x, &train.targets, &mut LogObserver::new(1000))?;

        println!("\n{link:?} link:");
        println!(
            "  iterations: {}, converged: {}",
            model.n_iterations.unwrap_or(0),
            model.converged.unwrap_or(false)
        );
        println!("  train accuracy: {:.3}", model.score(&train_x, &train.targets)?);
        println!("  test accuracy: {:.3}", model.score(&test_x, &test.targets)?);

        let probabilities = model.predict_proba(&test_x.slice(ndarray::s![..3, ..]).to_owned())?;
        println!("  first test rows, class probabilities:\n{probabilities:.3}");
    }

    Ok(())
}
