use descent::metrics::{confusion_matrix, f1_score, precision_score, recall_score};
use descent::{LogObserver, LogisticRegression};
use ndarray::array;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Logistic Regression Example ===\n");

    // Hours studied against pass (1) or fail (0)
    let hours = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0], [7.0], [8.0]];
    let passed = array![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0];

    let mut model = LogisticRegression::with_params(0.1, 5000, true);
    model.fit_with_observer(&hours, &passed, &mut LogObserver::new(500))?;

    let predictions = model.predict(&hours)?;
    let probabilities = model.predict_proba(&hours)?;

    println!("Accuracy: {:.2}", model.score(&hours, &passed)?);
    println!("Precision: {:.2}", precision_score(&passed, &predictions, 1.0)?);
    println!("Recall: {:.2}", recall_score(&passed, &predictions, 1.0)?);
    println!("F1: {:.2}", f1_score(&passed, &predictions, 1.0)?);
    println!("Confusion matrix [[TN, FP], [FN, TP]]:\n{}", confusion_matrix(&passed, &predictions, 1.0)?);

    println!("\nPer-student probabilities:");
    for ((h, p), label) in hours.column(0).iter().zip(probabilities.iter()).zip(passed.iter()) {
        println!("  {h:.0} hours: P(pass) = {p:.3} (actual {label})");
    }

    let new_students = array![[2.5], [4.5], [9.0]];
    let new_probabilities = model.predict_proba(&new_students)?;
    println!("\nNew students:");
    for (h, p) in new_students.column(0).iter().zip(new_probabilities.iter()) {
        println!("  {h:.1} hours: P(pass) = {p:.3}");
    }

    Ok(())
}
