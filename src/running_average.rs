use num_traits::Float;

/// Arithmetic mean maintained without keeping the history of values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RunningAverage<T: Float> {
    value: T,
    count: u64,
}

impl<T: Float> RunningAverage<T> {
    pub fn from_parts(value: T, count: u64) -> Self {
        RunningAverage { value, count }
    }

    pub fn add(&mut self, new_value: T) {
        let count = T::from(self.count).unwrap_or_else(T::infinity);
        self.value = (self.value * count + new_value) / (count + T::one());
        self.count += 1;
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}
