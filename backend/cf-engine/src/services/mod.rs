pub mod corpus;
pub mod neighborhood;
pub mod prediction;
pub mod recommendation;

pub use corpus::{
    InMemoryLibrary, LibrarySnapshot, RatingCorpus, RatingRecord, SimilarityProvider,
    SimilarityTable,
};
pub use neighborhood::{select_neighborhood, NeighborhoodSelector};
pub use prediction::Predictor;
pub use recommendation::Recommender;
