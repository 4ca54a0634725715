pub mod construct_candidate;
