use bit_vec::BitVec;

/// Outcome of filling one layer.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct FillStats {
	/// Number of sweeps over the pending cells, including the final two that changed nothing.
	pub passes: u32,
	/// Number of cells that were resolved and left the pending set.
	pub resolved: u32,
	/// Number of non-boundary cells still pending at the end.
	pub pending: u32
}

impl FillStats {
	pub fn combine(&mut self, other: FillStats) {
		self.passes += other.passes;
		self.resolved += other.resolved;
		self.pending += other.pending;
	}
}

/// Fills a plane of `width` columns from its nonzero cells, never crossing a set bit of
/// `boundary` (indexed the same way as `cells`, `g * width + r`).
///
/// Values only flow towards greater R or G: a cell either pushes its own code into its next
/// neighbors, or pulls the code of one of them. Cells are only ever written while they hold 0,
/// and boundary cells are never written. The cell in the last row and column has no next
/// neighbors and cannot pull anything, so it is only resolved when a neighbor pushes into it.
///
/// The pending cells are swept alternately in ascending and descending order, which carries a
/// value along an unbroken run in a single sweep regardless of the direction it has to travel.
/// Filling stops once a pair of sweeps resolves nothing.
pub fn fill_plane(cells: &mut [u8], boundary: &BitVec, width: usize) -> FillStats {
	assert!(width > 0 && cells.len() % width == 0, "plane of {} cells is not a multiple of the width {}", cells.len(), width);
	assert_eq!(boundary.len(), cells.len(), "boundary does not cover the plane");

	let height = cells.len() / width;
	let mut plane = Plane { cells, boundary, width, height };

	let mut pending: Vec<u32> = (0..plane.cells.len())
		.filter(|&index| !boundary[index])
		.map(|index| index as u32)
		.collect();

	let mut stats = FillStats::default();

	loop {
		let forward = sweep(&mut pending, false, |index| plane.resolve(index as usize));
		let backward = sweep(&mut pending, true, |index| plane.resolve(index as usize));

		stats.passes += 2;
		stats.resolved += forward + backward;

		if forward + backward == 0 {
			break;
		}
	}

	stats.pending = pending.len() as u32;

	stats
}

struct Plane<'a> {
	cells: &'a mut [u8],
	boundary: &'a BitVec,
	width: usize,
	height: usize
}

impl<'a> Plane<'a> {
	/// Tries to resolve a pending cell, returning true if it can leave the pending set.
	fn resolve(&mut self, index: usize) -> bool {
		let can_r = index % self.width + 1 < self.width;
		let can_g = index / self.width + 1 < self.height;

		let next_r = index + 1;
		let next_g = index + self.width;

		let own = self.cells[index];

		match (can_r, can_g) {
			(true, true) => {
				if own != 0 {
					self.push(next_r, own);
					self.push(next_g, own);
				} else if self.cells[next_r] != 0 {
					let code = self.cells[next_r];

					self.cells[index] = code;
					self.push(next_g, code);
				} else if self.cells[next_g] != 0 {
					let code = self.cells[next_g];

					self.cells[index] = code;
					self.push(next_r, code);
				} else {
					return false;
				}

				true
			},
			(true, false) => self.pull_or_push(index, next_r),
			(false, true) => self.pull_or_push(index, next_g),
			(false, false) => false
		}
	}

	fn pull_or_push(&mut self, index: usize, next: usize) -> bool {
		let own = self.cells[index];

		if own != 0 {
			self.push(next, own);
		} else if self.cells[next] != 0 {
			self.cells[index] = self.cells[next];
		} else {
			return false;
		}

		true
	}

	fn push(&mut self, target: usize, code: u8) {
		if !self.boundary[target] && self.cells[target] == 0 {
			self.cells[target] = code;
		}
	}
}

/// Runs `resolve` over the pending indices in the given order, dropping the resolved ones while
/// keeping the rest in ascending order. Returns the number dropped.
fn sweep<F>(pending: &mut Vec<u32>, descending: bool, mut resolve: F) -> u32 where F: FnMut(u32) -> bool {
	let len = pending.len();
	let mut resolved = 0;

	if descending {
		// Survivors are packed towards the end.
		let mut write = len;

		for read in (0..len).rev() {
			let index = pending[read];

			if resolve(index) {
				resolved += 1;
			} else {
				write -= 1;
				pending[write] = index;
			}
		}

		pending.drain(..write);
	} else {
		let mut write = 0;

		for read in 0..len {
			let index = pending[read];

			if resolve(index) {
				resolved += 1;
			} else {
				pending[write] = index;
				write += 1;
			}
		}

		pending.truncate(write);
	}

	resolved
}
