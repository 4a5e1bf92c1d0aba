use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::pos::round2;

#[derive(Clone)]
pub struct RecipeService {
    pool: DbPool,
}

impl RecipeService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        business_id: i64,
        request: CreateRecipeRequest,
    ) -> AppResult<RecipeResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Recipe name is required".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO mfg_recipes (business_id, product_id, name, instructions, created_at)
            VALUES (?, ?, ?, ?, NOW())
            "#,
        )
        .bind(business_id)
        .bind(request.product_id)
        .bind(request.name.trim())
        .bind(&request.instructions)
        .execute(&mut *tx)
        .await?;

        let recipe_id = result.last_insert_id() as i64;

        for ingredient in &request.ingredients {
            sqlx::query(
                r#"
                INSERT INTO mfg_recipe_ingredients (recipe_id, variation_id, quantity)
                VALUES (?, ?, ?)
                "#,
            )
            .bind(recipe_id)
            .bind(ingredient.variation_id)
            .bind(ingredient.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get(business_id, recipe_id).await
    }

    pub async fn get(&self, business_id: i64, id: i64) -> AppResult<RecipeResponse> {
        let recipe = self.fetch_recipe(business_id, id).await?;
        self.costed_response(recipe).await
    }

    pub async fn list(&self, business_id: i64) -> AppResult<Vec<RecipeResponse>> {
        let recipes = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, business_id, product_id, name, instructions, created_at
            FROM mfg_recipes
            WHERE business_id = ?
            ORDER BY name
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        let mut responses = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            responses.push(self.costed_response(recipe).await?);
        }
        Ok(responses)
    }

    pub async fn update(
        &self,
        business_id: i64,
        id: i64,
        request: UpdateRecipeRequest,
    ) -> AppResult<RecipeResponse> {
        let recipe = self.fetch_recipe(business_id, id).await?;

        let name = request.name.unwrap_or(recipe.name);
        let instructions = request.instructions.or(recipe.instructions);

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE mfg_recipes SET name = ?, instructions = ? WHERE id = ?")
            .bind(&name)
            .bind(&instructions)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Ingredient edits replace the whole list, same as the transaction
        // line edit path.
        if let Some(ingredients) = &request.ingredients {
            sqlx::query("DELETE FROM mfg_recipe_ingredients WHERE recipe_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for ingredient in ingredients {
                sqlx::query(
                    r#"
                    INSERT INTO mfg_recipe_ingredients (recipe_id, variation_id, quantity)
                    VALUES (?, ?, ?)
                    "#,
                )
                .bind(id)
                .bind(ingredient.variation_id)
                .bind(ingredient.quantity)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get(business_id, id).await
    }

    pub async fn delete(&self, business_id: i64, id: i64) -> AppResult<()> {
        self.fetch_recipe(business_id, id).await?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM mfg_recipe_ingredients WHERE recipe_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM mfg_recipes WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    async fn fetch_recipe(&self, business_id: i64, id: i64) -> AppResult<Recipe> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, business_id, product_id, name, instructions, created_at
            FROM mfg_recipes
            WHERE id = ? AND business_id = ?
            "#,
        )
        .bind(id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Recipe {id} not found")))
    }

    /// Costs each ingredient from its variation's tax-exclusive purchase
    /// price and totals the recipe.
    async fn costed_response(&self, recipe: Recipe) -> AppResult<RecipeResponse> {
        let rows = sqlx::query_as::<_, CostedIngredientRow>(
            r#"
            SELECT i.id, i.variation_id, p.name AS ingredient_name, i.quantity,
                   v.purchase_price_exc_tax
            FROM mfg_recipe_ingredients i
            JOIN variations v ON v.id = i.variation_id
            JOIN products p ON p.id = v.product_id
            WHERE i.recipe_id = ?
            ORDER BY i.id
            "#,
        )
        .bind(recipe.id)
        .fetch_all(&self.pool)
        .await?;

        let ingredients: Vec<IngredientResponse> = rows
            .into_iter()
            .map(|r| IngredientResponse {
                id: r.id,
                variation_id: r.variation_id,
                ingredient_name: r.ingredient_name,
                quantity: r.quantity,
                unit_cost: r.purchase_price_exc_tax,
                cost: round2(r.purchase_price_exc_tax * r.quantity),
            })
            .collect();

        let total_cost = round2(ingredients.iter().map(|i| i.cost).sum());

        Ok(RecipeResponse {
            id: recipe.id,
            product_id: recipe.product_id,
            name: recipe.name,
            instructions: recipe.instructions,
            ingredients,
            total_cost,
        })
    }
}
