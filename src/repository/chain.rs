use diesel::prelude::*;

use crate::domain::chain::{NewRestaurantChain, RestaurantChain};
use crate::domain::types::ChainId;
use crate::models::chain::{
    NewRestaurantChain as DbNewRestaurantChain, RestaurantChain as DbRestaurantChain,
};
use crate::repository::{ChainReader, ChainWriter, DieselRepository, RepositoryResult};

impl ChainReader for DieselRepository {
    fn get_chain_by_id(&self, id: ChainId) -> RepositoryResult<Option<RestaurantChain>> {
        use crate::schema::restaurant_chains;

        let mut conn = self.conn()?;

        let chain = restaurant_chains::table
            .filter(restaurant_chains::id.eq(id.get()))
            .first::<DbRestaurantChain>(&mut conn)
            .optional()?;

        let chain = chain.map(TryInto::try_into).transpose()?;
        Ok(chain)
    }
}

impl ChainWriter for DieselRepository {
    fn create_chain(&self, chain: &NewRestaurantChain) -> RepositoryResult<RestaurantChain> {
        use crate::schema::restaurant_chains;

        let mut conn = self.conn()?;
        let db_chain: DbNewRestaurantChain = chain.clone().into();

        let created = diesel::insert_into(restaurant_chains::table)
            .values(db_chain)
            .get_result::<DbRestaurantChain>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
