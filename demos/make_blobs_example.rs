use descent::dataset::write_csv;
use descent::synthetic::make_blobs;
use descent::Matrix;
use ndarray::{concatenate, Axis};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "blobs.csv".to_string());
    let blobs = make_blobs(150, 3, 2, 1.0, 0)?;

    let labels = blobs.labels.clone().insert_axis(Axis(1));
    let data: Matrix = concatenate(Axis(1), &[blobs.features.view(), labels.view()])?;
    write_csv(&path, &["x", "y", "label"], &data)?;

    println!("Wrote {} rows to {path}", data.nrows());
    println!("Centres:\n{:.3}", blobs.centers);
    Ok(())
}
