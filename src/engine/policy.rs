use rand::Rng;

/// Dense row-major `flights x tails` table of learned pairing values.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueTable {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl ValueTable {
    pub fn zeros(rows: usize, cols: usize) -> ValueTable {
        ValueTable {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, slot: usize) -> &[f64] {
        &self.values[slot * self.cols..(slot + 1) * self.cols]
    }

    pub fn get(&self, slot: usize, action: usize) -> f64 {
        self.values[slot * self.cols + action]
    }

    fn get_mut(&mut self, slot: usize, action: usize) -> &mut f64 {
        &mut self.values[slot * self.cols + action]
    }

    /// Index of the row maximum; the lowest index wins ties.
    pub fn best_action(&self, slot: usize) -> usize {
        let row = self.row(slot);
        let mut best = 0;
        for (i, v) in row.iter().enumerate().skip(1) {
            if *v > row[best] {
                best = i;
            }
        }
        best
    }

    /// Row maximum, or 0 past the last slot.
    pub fn max_value(&self, slot: usize) -> f64 {
        if slot >= self.rows {
            return 0.0;
        }
        self.row(slot)[self.best_action(slot)]
    }
}

/// Epsilon-greedy tabular learner over a fixed sequence of flight slots.
#[derive(Clone, Debug)]
pub struct AssignmentPolicy {
    table: ValueTable,
    alpha: f64,
    gamma: f64,
    epsilon: f64,
}

impl AssignmentPolicy {
    pub fn new(flights: usize, tails: usize, alpha: f64, gamma: f64, epsilon: f64) -> Self {
        AssignmentPolicy {
            table: ValueTable::zeros(flights, tails),
            alpha,
            gamma,
            epsilon,
        }
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn into_table(self) -> ValueTable {
        self.table
    }

    /// Explores with probability epsilon, otherwise exploits the row.
    pub fn select<R: Rng>(&self, slot: usize, rng: &mut R) -> usize {
        if rng.random::<f64>() < self.epsilon {
            rng.random_range(0..self.table.cols())
        } else {
            self.table.best_action(slot)
        }
    }

    /// Temporal-difference update of `(slot, action)`.
    ///
    /// Slots are visited in increasing order, so the next row still holds
    /// what the previous epoch left in it.
    pub fn update(&mut self, slot: usize, action: usize, reward: f64) {
        let max_next = self.table.max_value(slot + 1);
        let (alpha, gamma) = (self.alpha, self.gamma);
        let cell = self.table.get_mut(slot, action);
        *cell = (1.0 - alpha) * *cell + alpha * (reward + gamma * max_next);
    }
}
