use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting addition batch...");

        // Extract
        println!("Reading cases...");
        let cases = self.pipeline.extract().await?;
        println!("Read {} cases", cases.len());

        // Transform
        println!("Evaluating cases...");
        let result = self.pipeline.transform(cases).await?;
        println!(
            "Evaluated {} cases ({} summed, {} absent, {} invalid)",
            result.summary.total,
            result.summary.summed,
            result.summary.absent,
            result.summary.invalid
        );

        // Load
        println!("Writing results...");
        let output_path = self.pipeline.load(result).await?;
        println!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
