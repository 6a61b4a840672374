use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create an entity and print its id.
    Create(CreateArgs),
    /// Print an entity's representation.
    Show(ShowArgs),
    /// Delete an entity and everything it owns.
    Destroy(ShowArgs),
    /// List entities, optionally of one class.
    All(ClassFilterArgs),
    /// Set one attribute on an entity.
    Update(UpdateArgs),
    /// Count entities, optionally of one class.
    Count(ClassFilterArgs),
    /// Entity counts per type.
    Stats,
    /// Link an amenity to a place.
    Link(LinkArgs),
    /// Remove an amenity from a place.
    Unlink(LinkArgs),
    /// List entities related to another.
    Related(RelatedArgs),
    /// Find places by state, city and required amenities.
    Search(SearchArgs),
}

/// Arguments for `hbnb create`.
#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    /// Entity class (State, City, User, Place, Review, Amenity).
    pub class: String,
    /// Attributes as `key=value`. Quote strings (`name="My_house"`,
    /// underscores become spaces); bare values parse as integers or floats.
    pub params: Vec<String>,
}

/// Arguments for `hbnb show` and `hbnb destroy`.
#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    pub class: String,
    pub id: String,
}

/// Arguments for `hbnb all` and `hbnb count`.
#[derive(Clone, Debug, Args)]
pub struct ClassFilterArgs {
    pub class: Option<String>,
}

/// Arguments for `hbnb update`.
#[derive(Clone, Debug, Args)]
pub struct UpdateArgs {
    pub class: String,
    pub id: String,
    pub attribute: String,
    pub value: String,
}

/// Arguments for `hbnb link` and `hbnb unlink`.
#[derive(Clone, Debug, Args)]
pub struct LinkArgs {
    pub place_id: String,
    pub amenity_id: String,
}

/// Relationship traversed by `hbnb related`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RelatedKind {
    /// Cities of a state.
    Cities,
    /// Places in a city.
    PlacesOfCity,
    /// Places listed by a user.
    PlacesOfUser,
    /// Reviews of a place.
    ReviewsOfPlace,
    /// Reviews written by a user.
    ReviewsOfUser,
    /// Amenities of a place.
    Amenities,
    /// Places linking an amenity.
    PlacesWithAmenity,
}

/// Arguments for `hbnb related`.
#[derive(Clone, Debug, Args)]
pub struct RelatedArgs {
    pub relation: RelatedKind,
    /// Id of the parent (state, city, user, place or amenity).
    pub id: String,
}

/// Arguments for `hbnb search`. Every flag repeats.
#[derive(Clone, Debug, Default, Args)]
pub struct SearchArgs {
    /// Include places in every city of this state.
    #[arg(long = "state", value_name = "ID")]
    pub states: Vec<String>,
    /// Include places in this city.
    #[arg(long = "city", value_name = "ID")]
    pub cities: Vec<String>,
    /// Keep only places linking this amenity.
    #[arg(long = "amenity", value_name = "ID")]
    pub amenities: Vec<String>,
}
